use std::path::PathBuf;

use tmoread::tmo::{OpenOptions, Result, TmoFile};

use crate::cmd::util::{emit_json, time_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print stored time values in record order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let mut file = TmoFile::open_with(&path, OpenOptions::unmasked())?;
	let times = file.times()?;
	let rows: Vec<TimeJson> = times
		.values()
		.iter()
		.enumerate()
		.map(|(index, value)| TimeJson {
			index,
			value: *value,
			label: time_label(*value),
		})
		.collect();

	if json {
		emit_json(&TimesJson {
			path: path.display().to_string(),
			times: rows,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("records: {}", rows.len());
	println!("idx\ttime\tlabel");
	for row in &rows {
		println!("{}\t{}\t{}", row.index, row.value, row.label);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct TimeJson {
	index: usize,
	value: f64,
	label: String,
}

#[derive(serde::Serialize)]
struct TimesJson {
	path: String,
	times: Vec<TimeJson>,
}
