use std::io::{Read, Seek, SeekFrom};

use crate::tmo::{DomainDescriptor, ElementType, Result, TmoError};

/// Row-major matrix of decoded element values for one domain at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
	rows: usize,
	cols: usize,
	values: Vec<f64>,
}

impl Grid {
	/// Wrap row-major values. `values.len()` must equal `rows * cols`.
	pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
		(rows.checked_mul(cols) == Some(values.len())).then_some(Self { rows, cols, values })
	}

	/// Row count.
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Column count.
	pub fn cols(&self) -> usize {
		self.cols
	}

	/// Number of cells.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the grid has no cells.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Value at `(row, col)`.
	pub fn get(&self, row: usize, col: usize) -> Option<f64> {
		if row >= self.rows || col >= self.cols {
			return None;
		}
		self.values.get(row * self.cols + col).copied()
	}

	/// One row as a slice.
	pub fn row(&self, row: usize) -> Option<&[f64]> {
		let start = row.checked_mul(self.cols)?;
		self.values.get(start..start + self.cols).filter(|_| row < self.rows)
	}

	/// All values in row-major order.
	pub fn values(&self) -> &[f64] {
		&self.values
	}
}

/// Read `domain.rows * domain.cols` elements at `offset` and reshape row-major.
///
/// The buffer grows only as bytes arrive, so a block larger than the source fails as truncated.
pub fn read_grid<R: Read + Seek>(reader: &mut R, offset: u64, domain: &DomainDescriptor, element: ElementType, time: usize) -> Result<Grid> {
	let width = element.width();
	let truncated = || TmoError::TruncatedDataBlock {
		offset,
		domain: domain.index,
		time,
	};

	let need = domain.cell_count().checked_mul(width).ok_or_else(truncated)?;
	reader.seek(SeekFrom::Start(offset))?;
	let mut raw = Vec::new();
	if reader.by_ref().take(need as u64).read_to_end(&mut raw)? < need {
		return Err(truncated());
	}
	tracing::trace!(offset, domain = domain.index, time, bytes = need, "read data block");

	let values = raw.chunks_exact(width).map(|chunk| element.decode(chunk)).collect();
	Ok(Grid {
		rows: domain.rows,
		cols: domain.cols,
		values,
	})
}

#[cfg(test)]
mod tests;
