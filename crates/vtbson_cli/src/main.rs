#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;

use crate::error::Result;

#[derive(Parser)]
#[command(name = "vtbson", about = "Inspect and build vtgate bson payloads")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Dump(cmd::dump::Args),
	Encode(cmd::encode::Args),
	Query(cmd::query::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env("VTBSON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Query(args) => cmd::query::run(args),
	}
}
