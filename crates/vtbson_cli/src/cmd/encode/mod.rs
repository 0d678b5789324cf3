use std::path::PathBuf;

use tracing::info;
use vtbson::bson::encode_document;

use crate::cmd::json::json_to_document;
use crate::cmd::util::read_input;
use crate::error::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	#[arg(long)]
	pub out: PathBuf,
}

/// Convert a JSON object into an encoded document file.
pub fn run(args: Args) -> Result<()> {
	let Args { input, out } = args;

	let text = read_input(&input)?;
	let json: serde_json::Value = serde_json::from_slice(&text)?;
	let document = json_to_document(&json)?;
	let bytes = encode_document(&document);

	std::fs::write(&out, &bytes).map_err(|err| CliError::io(&out, err))?;
	info!(path = %out.display(), bytes = bytes.len(), "wrote document");
	println!("wrote {} bytes to {}", bytes.len(), out.display());
	Ok(())
}
