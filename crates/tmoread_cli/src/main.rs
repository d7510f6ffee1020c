#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "tmoread", about = "Multi-domain .tmo grid result inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print header fields and container layout.
	Info(cmd::info::Args),
	/// List domain grid descriptors.
	Domains(cmd::domains::Args),
	/// List stored time values.
	Times(cmd::times::Args),
	/// Stream (x, y, value) samples for one time.
	Samples(cmd::samples::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> tmoread::tmo::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Domains(args) => cmd::domains::run(args),
		Commands::Times(args) => cmd::times::run(args),
		Commands::Samples(args) => cmd::samples::run(args),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
