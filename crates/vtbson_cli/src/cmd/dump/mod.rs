use std::path::PathBuf;

use vtbson::bson::{DecodeOptions, Document, decode_document_with};

use crate::cmd::json::document_to_json;
use crate::cmd::print::{PrintOptions, print_document};
use crate::cmd::util::{emit_json, read_input};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub strict: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// Decode a document generically and print its value tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, strict, max_depth } = args;

	let bytes = read_input(&path)?;
	let options = decode_options(strict, max_depth);
	let document: Document = decode_document_with(&bytes, options)?;

	if json {
		let payload = DumpJson {
			path: path.display().to_string(),
			size: bytes.len(),
			document: document_to_json(&document),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("size: {}", bytes.len());
	print_document(&document, PrintOptions::default());
	Ok(())
}

/// Build decode options from the shared `--strict`/`--max-depth` flags.
pub(crate) fn decode_options(strict: bool, max_depth: Option<u32>) -> DecodeOptions {
	let mut options = if strict { DecodeOptions::strict() } else { DecodeOptions::default() };
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}
	options
}

#[derive(serde::Serialize)]
struct DumpJson {
	path: String,
	size: usize,
	document: serde_json::Value,
}
