use crate::tmo::{DEFAULT_TIME_TOLERANCE, MaskPolicy};

/// Default ceiling for in-memory decompression of zstd containers.
pub const DEFAULT_MAX_DECOMPRESSED_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// Options applied when opening a container.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOptions {
	/// Companion mask discovery.
	pub mask: MaskPolicy,
	/// Absolute tolerance when matching requested times.
	pub time_tolerance: f64,
	/// Maximum decompressed size accepted for zstd containers.
	pub max_decompressed_bytes: usize,
}

impl Default for OpenOptions {
	fn default() -> Self {
		Self {
			mask: MaskPolicy::Auto,
			time_tolerance: DEFAULT_TIME_TOLERANCE,
			max_decompressed_bytes: DEFAULT_MAX_DECOMPRESSED_BYTES,
		}
	}
}

impl OpenOptions {
	/// Defaults with masking disabled.
	pub fn unmasked() -> Self {
		Self {
			mask: MaskPolicy::Disabled,
			..Self::default()
		}
	}

	/// Replace the mask policy.
	pub fn with_mask(mut self, mask: MaskPolicy) -> Self {
		self.mask = mask;
		self
	}
}
