use std::path::PathBuf;

use tmoread::tmo::{DomainVisit, Result, SampleObserver, TimeToken, TmoFile};

use crate::cmd::util::{emit_json, open_options, time_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Stored time, or `max`/`min` for the aggregate records.
	#[arg(long)]
	pub time: String,
	/// Stop after this many samples.
	#[arg(long)]
	pub limit: Option<usize>,
	/// Skip companion mask discovery.
	#[arg(long)]
	pub no_mask: bool,
	/// Use this file as the companion mask.
	#[arg(long)]
	pub mask: Option<PathBuf>,
	/// Report per-domain and percentage progress on stderr.
	#[arg(long)]
	pub progress: bool,
	#[arg(long)]
	pub json: bool,
}

/// Resolve a time and stream its samples.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		time,
		limit,
		no_mask,
		mask,
		progress,
		json,
	} = args;

	let token: TimeToken = time.parse()?;
	let mut file = TmoFile::open_with(&path, open_options(no_mask, mask))?;
	let mask_path = file.mask_path().map(|item| item.display().to_string());
	let total = file.total_sample_count();
	let limit = limit.unwrap_or(usize::MAX);

	let mut reporter = ProgressReporter::new(progress);
	let iter = file.samples_with(token, &mut reporter)?;
	let resolved = iter.time();

	if json {
		let samples = iter
			.take(limit)
			.map(|item| {
				item.map(|sample| SampleJson {
					domain: sample.domain,
					x: sample.x,
					y: sample.y,
					value: sample.value,
				})
			})
			.collect::<Result<Vec<_>>>()?;
		emit_json(&SamplesJson {
			path: path.display().to_string(),
			requested: token.to_string(),
			time_index: resolved.index,
			time: resolved.value,
			mask: mask_path,
			total,
			emitted: samples.len(),
			samples,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("time: {} (index {})", time_label(resolved.value), resolved.index);
	println!("mask: {}", mask_path.as_deref().unwrap_or("none"));
	println!("total: {total}");
	println!("domain\tx\ty\tvalue");
	for item in iter.take(limit) {
		let sample = item?;
		println!("{}\t{}\t{}\t{}", sample.domain, sample.x, sample.y, sample.value);
	}

	Ok(())
}

struct ProgressReporter {
	enabled: bool,
	last_percent: usize,
}

impl ProgressReporter {
	fn new(enabled: bool) -> Self {
		Self { enabled, last_percent: 0 }
	}
}

impl SampleObserver for ProgressReporter {
	fn on_domain(&mut self, visit: &DomainVisit) {
		if self.enabled {
			match visit.dry_cells {
				Some(dry) => eprintln!("domain {}: {}x{} ({dry} dry)", visit.index, visit.rows, visit.cols),
				None => eprintln!("domain {}: {}x{}", visit.index, visit.rows, visit.cols),
			}
		}
	}

	fn on_cell(&mut self, visited: usize, total: usize) {
		if !self.enabled || total == 0 {
			return;
		}
		let percent = visited * 100 / total;
		if percent >= self.last_percent + 10 || visited == total {
			self.last_percent = percent;
			eprintln!("progress: {percent}%");
		}
	}
}

#[derive(serde::Serialize)]
struct SampleJson {
	domain: usize,
	x: f64,
	y: f64,
	value: f64,
}

#[derive(serde::Serialize)]
struct SamplesJson {
	path: String,
	requested: String,
	time_index: usize,
	time: f64,
	mask: Option<String>,
	total: usize,
	emitted: usize,
	samples: Vec<SampleJson>,
}
