//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Load and parse a JSON fixture.
pub fn load_json_fixture(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
	serde_json::from_str(&text).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Hand-assembled document bytes, independent of the codec under test.
///
/// Entries are appended in call order; [`RawDoc::build`] wraps them in a
/// `[len][entries][0x00]` frame.
#[derive(Debug, Clone, Default)]
pub struct RawDoc {
	body: Vec<u8>,
}

impl RawDoc {
	/// Start an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an entry with arbitrary value bytes.
	pub fn entry(mut self, tag: u8, key: &str, value: &[u8]) -> Self {
		self.body.push(tag);
		self.body.extend_from_slice(key.as_bytes());
		self.body.push(0);
		self.body.extend_from_slice(value);
		self
	}

	/// Append bytes verbatim, without any entry framing.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.body.extend_from_slice(bytes);
		self
	}

	/// Append a STRING entry.
	pub fn string(self, key: &str, value: &str) -> Self {
		let value = sized(value.as_bytes(), None);
		self.entry(0x02, key, &value)
	}

	/// Append a BINARY entry with subtype 0.
	pub fn binary(self, key: &str, value: &[u8]) -> Self {
		let value = sized(value, Some(0x00));
		self.entry(0x05, key, &value)
	}

	/// Append a BOOLEAN entry.
	pub fn boolean(self, key: &str, value: bool) -> Self {
		self.entry(0x08, key, &[u8::from(value)])
	}

	/// Append an INT entry.
	pub fn int(self, key: &str, value: i32) -> Self {
		self.entry(0x10, key, &value.to_le_bytes())
	}

	/// Append a LONG entry.
	pub fn long(self, key: &str, value: i64) -> Self {
		self.entry(0x12, key, &value.to_le_bytes())
	}

	/// Append a ULONG entry.
	pub fn ulong(self, key: &str, value: u64) -> Self {
		self.entry(0x11, key, &value.to_le_bytes())
	}

	/// Append a FLOAT entry.
	pub fn float(self, key: &str, value: f64) -> Self {
		self.entry(0x01, key, &value.to_le_bytes())
	}

	/// Append a DATETIME entry.
	pub fn datetime(self, key: &str, millis: i64) -> Self {
		self.entry(0x09, key, &millis.to_le_bytes())
	}

	/// Append a NULL entry.
	pub fn null(self, key: &str) -> Self {
		self.entry(0x0A, key, &[])
	}

	/// Append an OBJECT entry holding `doc`.
	pub fn object(self, key: &str, doc: &RawDoc) -> Self {
		self.entry(0x03, key, &doc.build())
	}

	/// Append an ARRAY entry holding `doc`.
	pub fn array(self, key: &str, doc: &RawDoc) -> Self {
		self.entry(0x04, key, &doc.build())
	}

	/// Frame the entries with a correct length prefix.
	pub fn build(&self) -> Vec<u8> {
		let len = i32::try_from(self.body.len() + 1).unwrap_or_else(|_| panic!("raw document too large"));
		self.build_with_len(len)
	}

	/// Frame the entries with an explicit, possibly wrong, length prefix.
	pub fn build_with_len(&self, len: i32) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.body.len() + 5);
		out.extend_from_slice(&len.to_le_bytes());
		out.extend_from_slice(&self.body);
		out.push(0);
		out
	}
}

fn sized(bytes: &[u8], subtype: Option<u8>) -> Vec<u8> {
	let len = i32::try_from(bytes.len()).unwrap_or_else(|_| panic!("raw payload too large"));
	let mut out = Vec::with_capacity(bytes.len() + 5);
	out.extend_from_slice(&len.to_le_bytes());
	out.extend(subtype);
	out.extend_from_slice(bytes);
	out
}
