use std::io::{Read, Seek};

use crate::tmo::{CellMapper, Grid, ResolvedTime, Result, TmoFile, WetMask};

/// One valid cell emitted for a requested time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
	/// Real-world x.
	pub x: f64,
	/// Real-world y.
	pub y: f64,
	/// Decoded cell value.
	pub value: f64,
	/// Zero-based domain index.
	pub domain: usize,
}

/// Summary passed to [`SampleObserver::on_domain`] before a domain's cells are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainVisit {
	/// Zero-based domain index.
	pub index: usize,
	/// Row count.
	pub rows: usize,
	/// Column count.
	pub cols: usize,
	/// Number of cells the companion mask marks dry (`None` when unmasked).
	pub dry_cells: Option<usize>,
}

/// Progress and logging hooks invoked in iteration order.
pub trait SampleObserver {
	/// Called once per domain, after its block has been read.
	fn on_domain(&mut self, _visit: &DomainVisit) {}

	/// Called once per visited cell, emitted or skipped.
	fn on_cell(&mut self, _visited: usize, _total: usize) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SampleObserver for NoopObserver {}

impl<T: SampleObserver + ?Sized> SampleObserver for &mut T {
	fn on_domain(&mut self, visit: &DomainVisit) {
		(**self).on_domain(visit);
	}

	fn on_cell(&mut self, visited: usize, total: usize) {
		(**self).on_cell(visited, total);
	}
}

struct DomainCursor {
	index: usize,
	grid: Grid,
	mask: Option<WetMask>,
	mapper: CellMapper,
	cell: usize,
}

/// Lazy sequence of valid samples for one resolved time, domain by domain.
///
/// Each domain's block (and mask block) is read when the iterator reaches it.
/// The first error is yielded once and ends the sequence.
pub struct SampleIter<'a, R, O> {
	file: &'a mut TmoFile<R>,
	time: ResolvedTime,
	observer: O,
	next_domain: usize,
	current: Option<DomainCursor>,
	visited: usize,
	total: usize,
	done: bool,
}

impl<'a, R: Read + Seek, O: SampleObserver> SampleIter<'a, R, O> {
	pub(crate) fn new(file: &'a mut TmoFile<R>, time: ResolvedTime, observer: O) -> Self {
		let total = file.total_sample_count();
		Self {
			file,
			time,
			observer,
			next_domain: 0,
			current: None,
			visited: 0,
			total,
			done: false,
		}
	}

	/// The stored time being iterated.
	pub fn time(&self) -> ResolvedTime {
		self.time
	}

	/// Cells across all domains, ignoring masking.
	pub fn total(&self) -> usize {
		self.total
	}

	fn load_domain(&mut self, index: usize) -> Result<DomainCursor> {
		let grid = self.file.read_domain(self.time.index, index)?;
		let mask = self.file.read_mask(self.time.index, index)?;
		let mapper = self.file.cell_mapper(index)?;

		let visit = DomainVisit {
			index,
			rows: grid.rows(),
			cols: grid.cols(),
			dry_cells: mask.as_ref().map(WetMask::dry_count),
		};
		tracing::debug!(
			domain = index,
			rows = visit.rows,
			cols = visit.cols,
			dry = ?visit.dry_cells,
			time = self.time.value,
			"visiting domain"
		);
		self.observer.on_domain(&visit);

		Ok(DomainCursor {
			index,
			grid,
			mask,
			mapper,
			cell: 0,
		})
	}
}

impl<R: Read + Seek, O: SampleObserver> Iterator for SampleIter<'_, R, O> {
	type Item = Result<Sample>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if self.done {
				return None;
			}

			if self.current.is_none() {
				if self.next_domain >= self.file.domains().len() {
					self.done = true;
					return None;
				}

				let index = self.next_domain;
				self.next_domain += 1;
				match self.load_domain(index) {
					Ok(cursor) => self.current = Some(cursor),
					Err(err) => {
						self.done = true;
						return Some(Err(err));
					}
				}
				continue;
			}

			let Some(cursor) = self.current.as_mut() else {
				continue;
			};

			if cursor.cell >= cursor.grid.len() {
				self.current = None;
				continue;
			}

			let cell = cursor.cell;
			cursor.cell += 1;
			self.visited += 1;
			self.observer.on_cell(self.visited, self.total);

			if cursor.mask.as_ref().is_some_and(|mask| mask.is_dry_at(cell)) {
				continue;
			}

			let cols = cursor.grid.cols();
			let (row, col) = (cell / cols, cell % cols);
			let (x, y) = cursor.mapper.map(row, col);
			return Some(Ok(Sample {
				x,
				y,
				value: cursor.grid.values()[cell],
				domain: cursor.index,
			}));
		}
	}
}
