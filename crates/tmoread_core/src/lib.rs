//! Public library API for reading multi-domain `.tmo` grid result containers.

/// Container decoding, time lookup, masking, and sample iteration.
pub mod tmo;
