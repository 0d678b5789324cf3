use std::path::Path;

use crate::error::{CliError, Result};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	std::fs::read(path).map_err(|err| CliError::io(path, err))
}

/// Render bytes as lowercase hex, truncated to `max_bytes`.
pub(crate) fn hex_preview(bytes: &[u8], max_bytes: usize) -> String {
	if bytes.len() <= max_bytes {
		return hex::encode(bytes);
	}
	format!("{}...", hex::encode(&bytes[..max_bytes]))
}
