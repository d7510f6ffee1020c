use std::path::{Path, PathBuf};

use crate::tmo::Grid;

/// Name token of the companion water-depth/mask container.
pub const MASK_SUFFIX: &str = "wd";

/// How a value container finds its companion mask.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MaskPolicy {
	/// Locate the companion by naming convention.
	#[default]
	Auto,
	/// Never mask.
	Disabled,
	/// Use this file as the companion.
	Path(PathBuf),
}

/// Derive the companion mask path: `<stem>_<token>.<ext>` becomes `<stem>_wd.<ext>`.
///
/// Returns `None` when the file stem has no underscore-delimited token to replace.
pub fn companion_mask_path(path: &Path) -> Option<PathBuf> {
	let stem = path.file_stem()?.to_str()?;
	let (base, _) = stem.rsplit_once('_')?;

	let mut name = format!("{base}_{MASK_SUFFIX}");
	if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
		name.push('.');
		name.push_str(ext);
	}
	Some(path.with_file_name(name))
}

/// Per-cell dry flags for one domain at one time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WetMask {
	cols: usize,
	dry: Vec<bool>,
}

impl WetMask {
	/// Mark cells whose mask value is below 1 as dry.
	pub fn from_grid(grid: &Grid) -> Self {
		Self {
			cols: grid.cols(),
			dry: grid.values().iter().map(|value| *value < 1.0).collect(),
		}
	}

	/// Whether the cell at row-major position `cell` is dry.
	pub fn is_dry_at(&self, cell: usize) -> bool {
		self.dry.get(cell).copied().unwrap_or(false)
	}

	/// Whether the cell at `(row, col)` is dry.
	pub fn is_dry(&self, row: usize, col: usize) -> bool {
		col < self.cols && self.is_dry_at(row * self.cols + col)
	}

	/// Number of dry cells.
	pub fn dry_count(&self) -> usize {
		self.dry.iter().filter(|dry| **dry).count()
	}
}
