#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "rsz", about = "RSZ instance data inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Classes(cmd::classes::Args),
	Class(cmd::classes::ClassArgs),
	Decode(cmd::decode::Args),
	Roundtrip(cmd::roundtrip::Args),
	New(cmd::create::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> rsz::rsz::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Classes(args) => cmd::classes::run(args),
		Commands::Class(args) => cmd::classes::run_class(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args),
		Commands::New(args) => cmd::create::run(args),
	}
}
