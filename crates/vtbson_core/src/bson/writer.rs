use crate::bson::Tag;

/// Growable output buffer for encoded documents.
#[derive(Debug, Default, Clone)]
pub struct Writer {
	buf: Vec<u8>,
}

/// Open composite frame awaiting its terminator and length back-patch.
#[derive(Debug)]
#[must_use = "a frame must be closed with Writer::end_frame"]
pub struct Frame {
	len_offset: usize,
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty writer with preallocated capacity.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// Bytes written so far.
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Number of bytes written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Return `true` when nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Consume the writer and return its buffer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	/// Write one raw byte.
	pub fn put_u8(&mut self, value: u8) {
		self.buf.push(value);
	}

	/// Write a little-endian `i32`.
	pub fn put_i32_le(&mut self, value: i32) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a little-endian `i64`.
	pub fn put_i64_le(&mut self, value: i64) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a little-endian `u64`.
	pub fn put_u64_le(&mut self, value: u64) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a little-endian IEEE-754 double.
	pub fn put_f64_le(&mut self, value: f64) {
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	/// Write a NUL-terminated key.
	///
	/// # Panics
	///
	/// Panics when `key` contains a NUL byte.
	pub fn put_cstring(&mut self, key: &str) {
		assert!(!key.as_bytes().contains(&0), "bson key contains a NUL byte: {key:?}");
		self.buf.extend_from_slice(key.as_bytes());
		self.buf.push(0);
	}

	/// Write the `(tag, key)` prefix of an entry.
	pub fn put_prefix(&mut self, tag: Tag, key: &str) {
		self.put_u8(tag.as_byte());
		self.put_cstring(key);
	}

	/// Write a length-prefixed string payload without terminator.
	pub fn put_string(&mut self, value: &str) {
		self.put_i32_le(wire_len(value.len()));
		self.buf.extend_from_slice(value.as_bytes());
	}

	/// Write a length-prefixed binary payload with the generic subtype.
	pub fn put_binary(&mut self, value: &[u8]) {
		self.put_i32_le(wire_len(value.len()));
		self.put_u8(0x00);
		self.buf.extend_from_slice(value);
	}

	/// Reserve the 4-byte length prefix of a composite value.
	pub fn begin_frame(&mut self) -> Frame {
		let len_offset = self.buf.len();
		self.buf.extend_from_slice(&[0_u8; 4]);
		Frame { len_offset }
	}

	/// Write the end-of-object marker and back-patch the frame length.
	///
	/// The length counts the bytes after the prefix, up to and including the terminator.
	pub fn end_frame(&mut self, frame: Frame) {
		self.put_u8(Tag::Eoo.as_byte());
		let body = self.buf.len() - (frame.len_offset + 4);
		let len = wire_len(body).to_le_bytes();
		self.buf[frame.len_offset..frame.len_offset + 4].copy_from_slice(&len);
	}
}

/// Convert an in-memory length to the signed 32-bit wire form.
///
/// # Panics
///
/// Panics when `len` does not fit the wire length field.
fn wire_len(len: usize) -> i32 {
	match i32::try_from(len) {
		Ok(len) => len,
		Err(_) => panic!("length {len} exceeds the i32 wire limit"),
	}
}
