use std::path::PathBuf;

use tmoread::tmo::{DEFAULT_TIME_TOLERANCE, MaskPolicy, OpenOptions, TimeIndex};

/// Serialize a payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

/// Build open options from the shared mask flags.
pub(crate) fn open_options(no_mask: bool, mask: Option<PathBuf>) -> OpenOptions {
	let policy = match (no_mask, mask) {
		(true, _) => MaskPolicy::Disabled,
		(false, Some(path)) => MaskPolicy::Path(path),
		(false, None) => MaskPolicy::Auto,
	};
	OpenOptions::default().with_mask(policy)
}

/// Label a stored time, naming the aggregate sentinels.
pub(crate) fn time_label(value: f64) -> String {
	if !TimeIndex::is_sentinel(value, DEFAULT_TIME_TOLERANCE) {
		return format!("{value}");
	}
	if value > 0.0 { "max".to_owned() } else { "min".to_owned() }
}
