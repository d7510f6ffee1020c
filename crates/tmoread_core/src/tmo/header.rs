use std::io::Read;

use crate::tmo::bytes::Cursor;
use crate::tmo::source::read_fully;
use crate::tmo::{Result, TmoError};

/// Element storage type declared by the header's element byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
	/// 1-byte signed flags (mask containers).
	Mask,
	/// 4-byte IEEE float.
	F32,
	/// 8-byte IEEE float.
	F64,
}

impl ElementType {
	/// Map a declared byte width onto an element type.
	pub fn from_width(width: i32) -> Result<Self> {
		match width {
			1 => Ok(Self::Mask),
			4 => Ok(Self::F32),
			8 => Ok(Self::F64),
			_ => Err(TmoError::UnsupportedElementWidth { width }),
		}
	}

	/// Element width in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::Mask => 1,
			Self::F32 => 4,
			Self::F64 => 8,
		}
	}

	/// Decode one little-endian element, widening to `f64`.
	pub fn decode(self, raw: &[u8]) -> f64 {
		match self {
			Self::Mask => f64::from(raw[0] as i8),
			Self::F32 => f64::from(f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
			Self::F64 => {
				let mut buf = [0_u8; 8];
				buf.copy_from_slice(&raw[..8]);
				f64::from_le_bytes(buf)
			}
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Mask => "i8",
			Self::F32 => "f32",
			Self::F64 => "f64",
		}
	}
}

/// Interpretation of the fourth header block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sentinels {
	/// Value containers carry null and ignore markers.
	Values {
		/// Value written for cells without data.
		null_value: f32,
		/// Value written for cells the producer ignored.
		ignore_value: f32,
	},
	/// Mask containers carry a boolean-variant marker.
	Mask {
		/// First flag byte is non-zero.
		boolean: bool,
	},
}

/// Parsed 256-byte global header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmoHeader {
	/// Container format version.
	pub version: i32,
	/// Minor format version (`0` before version 3).
	pub minor_version: i32,
	/// Producing application version (`None` before version 3).
	pub app_version: Option<i32>,
	/// Result kind code.
	pub result_kind: i32,
	/// Padding indicator.
	pub padding: i32,
	/// Element storage type.
	pub element: ElementType,
	/// Data type code.
	pub data_type: i32,
	/// Whether time steps are regularly spaced.
	pub regular_interval: bool,
	/// Number of domains.
	pub domain_count: usize,
	/// Number of regular time steps.
	pub time_count: usize,
	/// Whether a trailing aggregate record follows the regular series.
	pub has_aggregate: bool,
	/// Largest per-domain block size in elements.
	pub max_block_size: u64,
	/// Bytes between consecutive time records.
	pub record_stride: u64,
	/// Series start time.
	pub series_start: f32,
	/// Series end time.
	pub series_end: f32,
	/// Series output interval.
	pub series_interval: f32,
	/// Null/ignore markers or mask marker.
	pub sentinels: Sentinels,
}

impl TmoHeader {
	/// Exact size of the global header in bytes.
	pub const SIZE: usize = 256;
	/// Size of each header block.
	pub const BLOCK_SIZE: usize = 64;
	/// Size of one domain record.
	pub const DOMAIN_RECORD_SIZE: u64 = 128;
	/// Leading pad at the start of every time record.
	pub const RECORD_PAD: u64 = 64;
	/// Bytes added to the scaled block size to form the record stride.
	pub const RECORD_OVERHEAD: u64 = 128;
	/// First version that stores minor and application versions and drops the half-cell offset.
	pub const V3: i32 = 3;

	/// Read and parse the header from the start of `reader`.
	pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut buf = [0_u8; Self::SIZE];
		let have = read_fully(reader, &mut buf)?;
		if have < Self::SIZE {
			return Err(TmoError::TruncatedHeader { have });
		}
		Self::parse(&buf)
	}

	/// Parse a header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let bytes = bytes.get(..Self::SIZE).ok_or(TmoError::TruncatedHeader { have: bytes.len() })?;
		let mut cursor = Cursor::new(bytes);

		let ints = cursor.read_i32_block::<16>()?;
		let [version, result_kind, padding, width, data_type, regular, domain_count, time_count, aggregate, ..] = ints;
		let (minor_version, app_version) = if version >= Self::V3 { (ints[9], Some(ints[10])) } else { (0, None) };

		let element = ElementType::from_width(width)?;
		if domain_count < 1 {
			return Err(TmoError::InvalidDomainCount { count: domain_count });
		}
		if time_count < 0 {
			return Err(TmoError::InvalidTimeCount { count: time_count });
		}

		let longs = cursor.read_i64_block::<8>()?;
		let max_block_size = u64::try_from(longs[0]).map_err(|_| TmoError::InvalidBlockSize { size: longs[0] })?;
		let record_stride = max_block_size
			.checked_mul(element.width() as u64)
			.and_then(|bytes| bytes.checked_add(Self::RECORD_OVERHEAD))
			.ok_or(TmoError::InvalidBlockSize { size: longs[0] })?;

		let series = cursor.read_f32_block::<16>()?;

		let sentinels = match element {
			ElementType::Mask => {
				let marker = cursor.read_i8()?;
				Sentinels::Mask { boolean: marker != 0 }
			}
			_ => {
				let values = cursor.read_f32_block::<16>()?;
				Sentinels::Values {
					null_value: values[0],
					ignore_value: values[1],
				}
			}
		};

		Ok(Self {
			version,
			minor_version,
			app_version,
			result_kind,
			padding,
			element,
			data_type,
			regular_interval: regular != 0,
			domain_count: domain_count as usize,
			time_count: time_count as usize,
			has_aggregate: aggregate != 0,
			max_block_size,
			record_stride,
			series_start: series[0],
			series_end: series[1],
			series_interval: series[2],
			sentinels,
		})
	}

	/// Byte offset of the first time record.
	pub fn header_len(&self) -> u64 {
		Self::SIZE as u64 + self.domain_count as u64 * Self::DOMAIN_RECORD_SIZE
	}

	/// Number of stored records, counting the trailing aggregate record.
	pub fn record_count(&self) -> usize {
		self.time_count + usize::from(self.has_aggregate)
	}

	/// Whether samples sit half a cell in from the domain origin.
	pub fn half_cell_offset(&self) -> bool {
		self.version < Self::V3
	}

	/// Whether this container holds mask flags rather than values.
	pub fn is_mask(&self) -> bool {
		self.element == ElementType::Mask
	}
}

#[cfg(test)]
mod tests;
