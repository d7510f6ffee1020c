//! Shared test helpers for workspace crates: synthetic `.tmo` containers and temp fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const HEADER_SIZE: usize = 256;
const DOMAIN_RECORD_SIZE: usize = 128;
const RECORD_PAD: usize = 64;
const RECORD_OVERHEAD: usize = 128;

/// Geometry of one synthetic domain.
#[derive(Debug, Clone)]
pub struct DomainSpec {
	/// Row count.
	pub rows: usize,
	/// Column count.
	pub cols: usize,
	/// Origin `(x, y)`.
	pub origin: (f64, f64),
	/// Cell size `(dx, dy)`.
	pub cell: (f64, f64),
	/// Rotation in radians.
	pub angle: f64,
	/// Buffer size in elements (defaults to `rows * cols`).
	pub buffer_elems: Option<usize>,
}

impl DomainSpec {
	/// Axis-aligned domain with square cells.
	pub fn new(rows: usize, cols: usize, origin: (f64, f64), cell: f64) -> Self {
		Self {
			rows,
			cols,
			origin,
			cell: (cell, cell),
			angle: 0.0,
			buffer_elems: None,
		}
	}

	/// Set rotation in radians.
	pub fn rotated(mut self, angle: f64) -> Self {
		self.angle = angle;
		self
	}

	/// Pad the buffer to `elems` elements.
	pub fn buffered(mut self, elems: usize) -> Self {
		self.buffer_elems = Some(elems);
		self
	}

	fn buffer(&self) -> usize {
		self.buffer_elems.unwrap_or(self.rows * self.cols)
	}
}

/// Builder for bit-exact synthetic containers.
#[derive(Debug, Clone)]
pub struct TmoBuilder {
	version: i32,
	width: usize,
	domains: Vec<DomainSpec>,
	records: Vec<(f32, Vec<Vec<f64>>)>,
	aggregate: Option<(f32, Vec<Vec<f64>>)>,
	max_block_size: Option<usize>,
}

impl TmoBuilder {
	/// Start a version-3 container with the given element width (1, 4 or 8).
	pub fn new(width: usize) -> Self {
		Self {
			version: 3,
			width,
			domains: Vec::new(),
			records: Vec::new(),
			aggregate: None,
			max_block_size: None,
		}
	}

	/// One 2x2 domain at `(100, 200)` with 10-unit cells and a single record at `t=1.0`.
	pub fn single_2x2(version: i32) -> Self {
		Self::new(4)
			.version(version)
			.domain(DomainSpec::new(2, 2, (100.0, 200.0), 10.0))
			.record(1.0, vec![vec![1.0, 2.0, 3.0, 4.0]])
	}

	/// Set the format version.
	pub fn version(mut self, version: i32) -> Self {
		self.version = version;
		self
	}

	/// Append a domain.
	pub fn domain(mut self, domain: DomainSpec) -> Self {
		self.domains.push(domain);
		self
	}

	/// Append a regular time record holding row-major values per domain.
	pub fn record(mut self, time: f32, values: Vec<Vec<f64>>) -> Self {
		self.records.push((time, values));
		self
	}

	/// Set the trailing aggregate record.
	pub fn aggregate(mut self, time: f32, values: Vec<Vec<f64>>) -> Self {
		self.aggregate = Some((time, values));
		self
	}

	/// Override the header's max block size (in elements).
	pub fn max_block_size(mut self, elems: usize) -> Self {
		self.max_block_size = Some(elems);
		self
	}

	/// Header length implied by the current domain list.
	pub fn header_len(&self) -> usize {
		HEADER_SIZE + self.domains.len() * DOMAIN_RECORD_SIZE
	}

	/// Record stride implied by the current settings.
	pub fn record_stride(&self) -> usize {
		let max = self.max_block_size.unwrap_or_else(|| self.domains.iter().map(DomainSpec::buffer).sum());
		max * self.width + RECORD_OVERHEAD
	}

	/// Encode the container.
	pub fn build(&self) -> Vec<u8> {
		let mut out = Vec::new();
		self.push_header(&mut out);
		for domain in &self.domains {
			self.push_domain(&mut out, domain);
		}

		let stride = self.record_stride();
		for (time, values) in self.records.iter().chain(self.aggregate.iter()) {
			let start = out.len();
			out.resize(start + stride, 0);
			out[start..start + 4].copy_from_slice(&time.to_le_bytes());

			let mut at = start + RECORD_PAD;
			for (domain, cells) in self.domains.iter().zip(values) {
				for (idx, value) in cells.iter().enumerate() {
					let pos = at + idx * self.width;
					self.encode(&mut out[pos..pos + self.width], *value);
				}
				at += domain.buffer() * self.width;
			}
		}
		out
	}

	/// Encode and write the container to `dir/name`.
	pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
		write_bytes(dir, name, &self.build())
	}

	fn push_header(&self, out: &mut Vec<u8>) {
		let mut ints = [0_i32; 16];
		ints[0] = self.version;
		ints[1] = 1;
		ints[3] = self.width as i32;
		ints[4] = 1;
		ints[5] = 1;
		ints[6] = self.domains.len() as i32;
		ints[7] = self.records.len() as i32;
		ints[8] = i32::from(self.aggregate.is_some());
		if self.version >= 3 {
			ints[9] = 2;
			ints[10] = 20240;
		}
		for item in ints {
			out.extend_from_slice(&item.to_le_bytes());
		}

		let max = (self.record_stride() - RECORD_OVERHEAD) / self.width;
		let mut longs = [0_i64; 8];
		longs[0] = max as i64;
		for item in longs {
			out.extend_from_slice(&item.to_le_bytes());
		}

		let mut series = [0_f32; 16];
		series[0] = self.records.first().map_or(0.0, |item| item.0);
		series[1] = self.records.last().map_or(0.0, |item| item.0);
		series[2] = 1.0;
		for item in series {
			out.extend_from_slice(&item.to_le_bytes());
		}

		if self.width == 1 {
			let mut flags = [0_u8; 64];
			flags[0] = 1;
			out.extend_from_slice(&flags);
		} else {
			let mut sentinels = [0_f32; 16];
			sentinels[0] = -999.0;
			sentinels[1] = -9999.0;
			for item in sentinels {
				out.extend_from_slice(&item.to_le_bytes());
			}
		}
	}

	fn push_domain(&self, out: &mut Vec<u8>, domain: &DomainSpec) {
		let mut ints = [0_i32; 8];
		ints[0] = domain.cols as i32;
		ints[1] = domain.rows as i32;
		for item in ints {
			out.extend_from_slice(&item.to_le_bytes());
		}

		let longs = [(domain.rows * domain.cols) as i64, domain.buffer() as i64, 0, 0];
		for item in longs {
			out.extend_from_slice(&item.to_le_bytes());
		}

		let floats = [domain.origin.0, domain.origin.1, domain.cell.0, domain.cell.1, domain.angle, 0.0, 0.0, 0.0];
		for item in floats {
			out.extend_from_slice(&item.to_le_bytes());
		}
	}

	fn encode(&self, dst: &mut [u8], value: f64) {
		match self.width {
			1 => dst[0] = (value as i8) as u8,
			4 => dst.copy_from_slice(&(value as f32).to_le_bytes()),
			8 => dst.copy_from_slice(&value.to_le_bytes()),
			other => panic!("unsupported element width {other}"),
		}
	}
}

/// Create a fresh temporary directory.
pub fn temp_dir() -> TempDir {
	tempfile::tempdir().expect("temp dir is created")
}

/// Write raw bytes to `dir/name` and return the path.
pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	fs::write(&path, bytes).expect("fixture is written");
	path
}

/// zstd-compress bytes at the default level.
pub fn zstd_compress(bytes: &[u8]) -> Vec<u8> {
	zstd::encode_all(bytes, 0).expect("zstd encodes")
}
