mod bytes;
mod compression;
mod coords;
mod domain;
mod error;
mod file;
mod grid;
mod header;
mod layout;
mod mask;
mod options;
mod samples;
mod source;
mod times;

/// Compression detection result.
pub use compression::{Compression, ZSTD_MAGIC};
/// Grid index to world coordinate mapping.
pub use coords::CellMapper;
/// Per-domain geometry records.
pub use domain::DomainDescriptor;
/// Error and result aliases.
pub use error::{Result, TmoError};
/// Container abstraction.
pub use file::TmoFile;
/// Decoded domain blocks and the block reader.
pub use grid::{Grid, read_grid};
/// Global header representation.
pub use header::{ElementType, Sentinels, TmoHeader};
/// Domain block address calculation.
pub use layout::RecordLayout;
/// Companion mask discovery and dry-cell flags.
pub use mask::{MASK_SUFFIX, MaskPolicy, WetMask, companion_mask_path};
/// Open-time configuration.
pub use options::{DEFAULT_MAX_DECOMPRESSED_BYTES, OpenOptions};
/// Lazy sample iteration and progress hooks.
pub use samples::{DomainVisit, NoopObserver, Sample, SampleIter, SampleObserver};
/// Seekable byte source backing opened files.
pub use source::Source;
/// Time index, tokens, and resolution.
pub use times::{DEFAULT_TIME_TOLERANCE, ResolvedTime, TimeIndex, TimeToken};
