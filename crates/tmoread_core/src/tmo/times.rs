use std::fmt;
use std::io::{Read, Seek};
use std::str::FromStr;

use crate::tmo::source::read_at;
use crate::tmo::{Result, TmoError, TmoHeader};

/// Default absolute tolerance when matching a requested time.
pub const DEFAULT_TIME_TOLERANCE: f64 = 0.001;

/// Caller-supplied time request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeToken {
	/// A literal stored time.
	At(f64),
	/// The maximum/last aggregate record.
	Last,
	/// The minimum/first aggregate record.
	First,
}

impl TimeToken {
	/// Sentinel magnitude stored for the maximum/last aggregate.
	pub const LAST_MAGNITUDE: f64 = 99999.0;
	/// Sentinel magnitude stored for the minimum/first aggregate.
	pub const FIRST_MAGNITUDE: f64 = -99999.0;

	/// Time magnitude searched for in the index.
	pub fn magnitude(self) -> f64 {
		match self {
			Self::At(value) => value,
			Self::Last => Self::LAST_MAGNITUDE,
			Self::First => Self::FIRST_MAGNITUDE,
		}
	}
}

impl FromStr for TimeToken {
	type Err = TmoError;

	fn from_str(text: &str) -> Result<Self> {
		let trimmed = text.trim();
		match trimmed.to_ascii_lowercase().as_str() {
			"max" | "maximum" | "last" => Ok(Self::Last),
			"min" | "minimum" | "first" => Ok(Self::First),
			_ => trimmed
				.parse::<f64>()
				.ok()
				.filter(|value| value.is_finite())
				.map(Self::At)
				.ok_or_else(|| TmoError::InvalidTimeToken { token: text.to_owned() }),
		}
	}
}

impl fmt::Display for TimeToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::At(value) => write!(f, "{value}"),
			Self::Last => f.write_str("max"),
			Self::First => f.write_str("min"),
		}
	}
}

/// A stored time matched to a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTime {
	/// Zero-based record index.
	pub index: usize,
	/// Stored time value.
	pub value: f64,
}

/// Ordered time values, one per stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndex {
	values: Vec<f64>,
}

impl TimeIndex {
	/// Scan the leading time value of every record.
	pub fn read<R: Read + Seek>(reader: &mut R, header: &TmoHeader) -> Result<Self> {
		let count = header.record_count();
		let mut values = Vec::new();
		for index in 0..count {
			let offset = (index as u64)
				.checked_mul(header.record_stride)
				.and_then(|record| record.checked_add(header.header_len()))
				.ok_or(TmoError::InvalidBlockSize {
					size: header.max_block_size as i64,
				})?;
			let mut buf = [0_u8; 4];
			if read_at(reader, offset, &mut buf)? < buf.len() {
				return Err(TmoError::TruncatedTimeRecord { index, offset });
			}
			values.push(f64::from(f32::from_le_bytes(buf)));
		}
		tracing::trace!(records = count, "time index built");
		Ok(Self { values })
	}

	/// Build an index from known values.
	pub fn from_values(values: Vec<f64>) -> Self {
		Self { values }
	}

	/// Stored values in record order.
	pub fn values(&self) -> &[f64] {
		&self.values
	}

	/// Number of stored records.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no records are stored.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Match `token` against the closest stored time within `tolerance`.
	///
	/// Ties resolve to the earliest record.
	pub fn resolve(&self, token: TimeToken, tolerance: f64) -> Result<ResolvedTime> {
		let requested = token.magnitude();
		let mut best: Option<(usize, f64)> = None;
		for (index, value) in self.values.iter().copied().enumerate() {
			let delta = (value - requested).abs();
			if delta > tolerance {
				continue;
			}
			if best.is_none_or(|(_, best_delta)| delta < best_delta) {
				best = Some((index, delta));
			}
		}

		best.map(|(index, _)| ResolvedTime {
			index,
			value: self.values[index],
		})
		.ok_or(TmoError::TimeNotFound { requested })
	}

	/// Whether a stored value is one of the aggregate sentinels.
	pub fn is_sentinel(value: f64, tolerance: f64) -> bool {
		(value - TimeToken::LAST_MAGNITUDE).abs() <= tolerance || (value - TimeToken::FIRST_MAGNITUDE).abs() <= tolerance
	}
}

#[cfg(test)]
mod tests;
