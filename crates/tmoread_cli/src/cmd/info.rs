use std::path::PathBuf;

use tmoread::tmo::{Result, Sentinels, TmoFile, TmoHeader};

use crate::cmd::util::{emit_json, open_options};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Skip companion mask discovery.
	#[arg(long)]
	pub no_mask: bool,
	/// Use this file as the companion mask.
	#[arg(long)]
	pub mask: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, record layout, and mask status.
pub fn run(args: Args) -> Result<()> {
	let Args { path, no_mask, mask, json } = args;

	let mut file = TmoFile::open_with(&path, open_options(no_mask, mask))?;
	let records = file.times()?.len();
	let header = file.header;

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			compression: file.compression.as_str(),
			version: header.version,
			minor_version: header.minor_version,
			app_version: header.app_version,
			result_kind: header.result_kind,
			data_type: header.data_type,
			element: header.element.as_str(),
			element_width: header.element.width(),
			domain_count: header.domain_count,
			time_count: header.time_count,
			has_aggregate: header.has_aggregate,
			record_count: records,
			header_len: file.header_len(),
			record_stride: header.record_stride,
			total_samples: file.total_sample_count(),
			half_cell_offset: header.half_cell_offset(),
			null_value: null_value(&header),
			mask: file.mask_path().map(|item| item.display().to_string()),
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", file.compression.as_str());
	println!("version: {}", header.version);
	println!("minor_version: {}", header.minor_version);
	match header.app_version {
		Some(app) => println!("app_version: {app}"),
		None => println!("app_version: unknown"),
	}
	println!("result_kind: {}", header.result_kind);
	println!("data_type: {}", header.data_type);
	println!("element: {} ({} bytes)", header.element.as_str(), header.element.width());
	println!("regular_interval: {}", header.regular_interval);
	println!("series: start={} end={} interval={}", header.series_start, header.series_end, header.series_interval);
	match header.sentinels {
		Sentinels::Values { null_value, ignore_value } => println!("sentinels: null={null_value} ignore={ignore_value}"),
		Sentinels::Mask { boolean } => println!("sentinels: mask boolean={boolean}"),
	}
	println!("domain_count: {}", header.domain_count);
	println!("time_count: {}", header.time_count);
	println!("has_aggregate: {}", header.has_aggregate);
	println!("record_count: {records}");
	println!("header_len: {}", file.header_len());
	println!("record_stride: {}", header.record_stride);
	println!("total_samples: {}", file.total_sample_count());
	println!("half_cell_offset: {}", header.half_cell_offset());
	match file.mask_path() {
		Some(mask) => println!("mask: {}", mask.display()),
		None => println!("mask: none"),
	}

	Ok(())
}

fn null_value(header: &TmoHeader) -> Option<f32> {
	match header.sentinels {
		Sentinels::Values { null_value, .. } => Some(null_value),
		Sentinels::Mask { .. } => None,
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	version: i32,
	minor_version: i32,
	app_version: Option<i32>,
	result_kind: i32,
	data_type: i32,
	element: &'static str,
	element_width: usize,
	domain_count: usize,
	time_count: usize,
	has_aggregate: bool,
	record_count: usize,
	header_len: u64,
	record_stride: u64,
	total_samples: usize,
	half_cell_offset: bool,
	null_value: Option<f32>,
	mask: Option<String>,
}
