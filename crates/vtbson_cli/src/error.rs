use std::path::PathBuf;

use thiserror::Error;
use vtbson::bson::BsonError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("{}: {source}", path.display())]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error(transparent)]
	Bson(#[from] BsonError),
	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),
	#[error("top-level json must be an object, found {found}")]
	NotAnObject { found: &'static str },
	#[error("invalid $binary hex at {key}: {source}")]
	InvalidHex {
		key: String,
		source: hex::FromHexError,
	},
	#[error("invalid $date at {key}: expected integer milliseconds")]
	InvalidDate { key: String },
	#[error("key {key:?} contains a NUL byte")]
	NulInKey { key: String },
}

impl CliError {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
