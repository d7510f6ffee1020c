use crate::tmo::DomainDescriptor;

/// Maps `(row, col)` grid indices to real-world coordinates for one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapper {
	origin_x: f64,
	origin_y: f64,
	dx: f64,
	dy: f64,
	cos: f64,
	sin: f64,
	half_cell: bool,
}

impl CellMapper {
	/// Build a mapper; `half_cell` shifts samples to cell centers (pre-v3 containers).
	pub fn new(domain: &DomainDescriptor, half_cell: bool) -> Self {
		let (sin, cos) = if domain.angle == 0.0 { (0.0, 1.0) } else { domain.angle.sin_cos() };
		Self {
			origin_x: domain.origin_x,
			origin_y: domain.origin_y,
			dx: domain.dx,
			dy: domain.dy,
			cos,
			sin,
			half_cell,
		}
	}

	/// Real-world `(x, y)` of the sample at `(row, col)`.
	pub fn map(&self, row: usize, col: usize) -> (f64, f64) {
		let mut local_x = col as f64 * self.dx;
		let mut local_y = row as f64 * self.dy;
		if self.half_cell {
			local_x += self.dx / 2.0;
			local_y += self.dy / 2.0;
		}

		(
			self.origin_x + local_x * self.cos - local_y * self.sin,
			self.origin_y + local_x * self.sin + local_y * self.cos,
		)
	}
}
