use std::io::{Read, Seek};

use crate::tmo::bytes::Cursor;
use crate::tmo::source::read_at;
use crate::tmo::{Result, TmoError, TmoHeader};

/// Geometry and storage sizing of one rectangular grid domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainDescriptor {
	/// Zero-based domain index.
	pub index: usize,
	/// Row count.
	pub rows: usize,
	/// Column count.
	pub cols: usize,
	/// Real-world x of the grid origin.
	pub origin_x: f64,
	/// Real-world y of the grid origin.
	pub origin_y: f64,
	/// Cell size along columns.
	pub dx: f64,
	/// Cell size along rows.
	pub dy: f64,
	/// Rotation about the origin in radians.
	pub angle: f64,
	/// Raw data block size in bytes.
	pub data_bytes: u64,
	/// Padded buffer size in bytes.
	pub buffer_bytes: u64,
}

impl DomainDescriptor {
	/// Size of one on-disk domain record.
	pub const RECORD_SIZE: usize = 128;

	/// Read all domain records following the global header.
	pub fn read_table<R: Read + Seek>(reader: &mut R, header: &TmoHeader) -> Result<Vec<Self>> {
		let mut domains = Vec::new();
		for index in 0..header.domain_count {
			let offset = TmoHeader::SIZE as u64 + index as u64 * TmoHeader::DOMAIN_RECORD_SIZE;
			let mut buf = [0_u8; Self::RECORD_SIZE];
			if read_at(reader, offset, &mut buf)? < Self::RECORD_SIZE {
				return Err(TmoError::TruncatedDomainRecord { index });
			}
			domains.push(Self::parse(index, &buf, header.element.width())?);
		}
		Ok(domains)
	}

	/// Parse one 128-byte domain record.
	pub fn parse(index: usize, bytes: &[u8], element_width: usize) -> Result<Self> {
		let bytes = bytes.get(..Self::RECORD_SIZE).ok_or(TmoError::TruncatedDomainRecord { index })?;
		let mut cursor = Cursor::new(bytes);

		let ints = cursor.read_i32_block::<8>()?;
		let longs = cursor.read_i64_block::<4>()?;
		let floats = cursor.read_f64_block::<8>()?;

		let (cols, rows) = (i64::from(ints[0]), i64::from(ints[1]));
		let width = element_width as i64;
		let invalid = || TmoError::InvalidDomainGeometry {
			index,
			rows,
			cols,
			data_bytes: longs[0].saturating_mul(width),
			buffer_bytes: longs[1].saturating_mul(width),
		};

		let cell_bytes = rows.checked_mul(cols).and_then(|cells| cells.checked_mul(width)).ok_or_else(invalid)?;
		let data_bytes = longs[0].checked_mul(width).ok_or_else(invalid)?;
		let buffer_bytes = longs[1].checked_mul(width).ok_or_else(invalid)?;
		if rows < 0 || cols < 0 || cell_bytes > data_bytes || data_bytes > buffer_bytes {
			return Err(invalid());
		}

		Ok(Self {
			index,
			rows: rows as usize,
			cols: cols as usize,
			origin_x: floats[0],
			origin_y: floats[1],
			dx: floats[2],
			dy: floats[3],
			angle: floats[4],
			data_bytes: data_bytes as u64,
			buffer_bytes: buffer_bytes as u64,
		})
	}

	/// Number of cells in the grid.
	pub fn cell_count(&self) -> usize {
		self.rows * self.cols
	}

	/// Whether another domain has the same grid shape.
	pub fn same_shape(&self, other: &Self) -> bool {
		self.rows == other.rows && self.cols == other.cols
	}
}
