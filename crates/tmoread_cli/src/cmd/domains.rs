use std::path::PathBuf;

use tmoread::tmo::{OpenOptions, Result, TmoFile};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print one row per domain descriptor.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = TmoFile::open_with(&path, OpenOptions::unmasked())?;
	let mut rows = Vec::with_capacity(file.domains().len());
	for domain in file.domains() {
		rows.push(DomainJson {
			index: domain.index,
			rows: domain.rows,
			cols: domain.cols,
			origin_x: domain.origin_x,
			origin_y: domain.origin_y,
			dx: domain.dx,
			dy: domain.dy,
			angle: domain.angle,
			data_bytes: domain.data_bytes,
			buffer_bytes: domain.buffer_bytes,
			first_offset: file.block_offset(0, domain.index).ok(),
		});
	}

	if json {
		emit_json(&DomainsJson {
			path: path.display().to_string(),
			domains: rows,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("domains: {}", rows.len());
	println!("idx\trows\tcols\torigin_x\torigin_y\tdx\tdy\tangle\tdata_bytes\tbuffer_bytes");
	for row in &rows {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			row.index, row.rows, row.cols, row.origin_x, row.origin_y, row.dx, row.dy, row.angle, row.data_bytes, row.buffer_bytes
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct DomainJson {
	index: usize,
	rows: usize,
	cols: usize,
	origin_x: f64,
	origin_y: f64,
	dx: f64,
	dy: f64,
	angle: f64,
	data_bytes: u64,
	buffer_bytes: u64,
	first_offset: Option<u64>,
}

#[derive(serde::Serialize)]
struct DomainsJson {
	path: String,
	domains: Vec<DomainJson>,
}
