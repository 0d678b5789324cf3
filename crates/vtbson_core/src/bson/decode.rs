use tracing::{debug, trace};

use crate::bson::{Bson, BsonDocument, BsonError, Cursor, Result, Tag, Value};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting of frames, the top-level document included.
	///
	/// The encoder does not enforce this, so a value nested deeper than the
	/// limit encodes but only decodes with a raised `max_depth`.
	pub max_depth: u32,
	/// Error when a frame's entries do not consume exactly its declared length.
	///
	/// When false, a nested frame's surplus declared bytes are ignored and
	/// decoding resumes right after its terminator.
	pub strict_frames: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			strict_frames: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that rejects any frame length disagreement.
	pub fn strict() -> Self {
		Self {
			strict_frames: true,
			..Self::default()
		}
	}
}

/// Open frame bookkeeping returned by [`Reader::open_frame`].
#[derive(Debug)]
#[must_use = "a frame must be closed with Reader::close_frame"]
pub struct OpenFrame {
	at: usize,
	end: usize,
	parent_limit: usize,
}

/// Decoder state: bounded cursor, nesting depth and the end of the enclosing frame.
#[derive(Debug)]
pub struct Reader<'a> {
	cursor: Cursor<'a>,
	options: DecodeOptions,
	depth: u32,
	limit: usize,
}

impl<'a> Reader<'a> {
	/// Create a reader at the start of `bytes`.
	pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			options,
			depth: 0,
			limit: bytes.len(),
		}
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.cursor.pos()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.cursor.remaining()
	}

	/// Read one entry tag byte.
	pub fn read_tag(&mut self) -> Result<Tag> {
		let at = self.cursor.pos();
		let byte = self.cursor.read_u8()?;
		Tag::from_byte(byte).ok_or(BsonError::UnknownTag { tag: byte, at })
	}

	/// Read a NUL-terminated UTF-8 entry key.
	pub fn read_key(&mut self) -> Result<&'a str> {
		let at = self.cursor.pos();
		let raw = self.cursor.read_cstring_bytes()?;
		std::str::from_utf8(raw).map_err(|_| BsonError::InvalidUtf8 { at })
	}

	/// Consume a frame length prefix and enter the frame.
	pub fn open_frame(&mut self) -> Result<OpenFrame> {
		let at = self.cursor.pos();
		let len = self.cursor.read_i32_le()?;
		if len < 1 {
			return Err(BsonError::InvalidLength { at, len });
		}
		let len = len as usize;
		let rem = self.frame_remaining();
		if len > rem {
			return Err(BsonError::FrameOverrun { at, len, rem });
		}
		if self.depth >= self.options.max_depth {
			return Err(BsonError::DecodeDepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		self.depth += 1;
		let end = self.cursor.pos() + len;
		let parent_limit = std::mem::replace(&mut self.limit, end);
		Ok(OpenFrame { at, end, parent_limit })
	}

	/// Leave a frame after its end-of-object marker was read.
	///
	/// Entries running past the declared end always fail. Surplus declared
	/// bytes fail in strict mode. Otherwise a nested frame ignores them, and
	/// the outermost frame skips them.
	pub fn close_frame(&mut self, frame: OpenFrame) -> Result<()> {
		self.depth = self.depth.saturating_sub(1);
		self.limit = frame.parent_limit;

		let pos = self.cursor.pos();
		let declared = frame.end - (frame.at + 4);
		let consumed = pos - (frame.at + 4);
		if pos > frame.end || (pos < frame.end && self.options.strict_frames) {
			return Err(BsonError::FrameLengthMismatch {
				at: frame.at,
				declared,
				consumed,
			});
		}
		if pos < frame.end {
			if self.depth > 0 {
				debug!(at = frame.at, declared, consumed, "ignoring surplus declared frame length");
			} else {
				debug!(at = frame.at, leftover = frame.end - pos, "skipping undecoded document bytes");
				self.cursor.skip(frame.end - pos)?;
			}
		}
		Ok(())
	}

	/// Read a length-prefixed string payload.
	pub fn read_str(&mut self) -> Result<&'a str> {
		let at = self.cursor.pos();
		let raw = self.read_sized(0)?;
		std::str::from_utf8(raw).map_err(|_| BsonError::InvalidUtf8 { at })
	}

	/// Read a length-prefixed binary payload, discarding its subtype.
	pub fn read_binary(&mut self) -> Result<&'a [u8]> {
		self.read_sized(1)
	}

	/// Read a one-byte boolean.
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.cursor.read_u8()? != 0)
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		self.cursor.read_i32_le()
	}

	/// Read a little-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		self.cursor.read_i64_le()
	}

	/// Read a little-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		self.cursor.read_u64_le()
	}

	/// Read a little-endian IEEE-754 double.
	pub fn read_f64(&mut self) -> Result<f64> {
		self.cursor.read_f64_le()
	}

	/// Consume and discard the value of an entry tagged `tag`.
	pub fn skip_value(&mut self, tag: Tag) -> Result<()> {
		if let Some(width) = tag.fixed_width() {
			return self.cursor.skip(width);
		}
		match tag {
			Tag::String => self.read_sized(0).map(drop),
			Tag::Binary => self.read_sized(1).map(drop),
			Tag::Object | Tag::Array => {
				let at = self.cursor.pos();
				let len = self.cursor.read_i32_le()?;
				if len < 1 {
					return Err(BsonError::InvalidLength { at, len });
				}
				self.skip_checked(at, len as usize)
			}
			_ => Err(BsonError::UnknownTag { tag: tag.as_byte(), at: self.cursor.pos() }),
		}
	}

	/// Read the entries of an open frame, handing each `(tag, key)` to `entry`.
	///
	/// Stops at the end-of-object marker and closes the frame.
	pub fn read_entries(&mut self, mut entry: impl FnMut(&mut Self, Tag, &'a str) -> Result<()>) -> Result<()> {
		let frame = self.open_frame()?;
		loop {
			let tag = self.read_tag()?;
			if tag == Tag::Eoo {
				break;
			}
			let key = self.read_key()?;
			entry(self, tag, key)?;
		}
		self.close_frame(frame)
	}

	/// Skip an entry value that no decoder claimed.
	pub(crate) fn skip_unknown(&mut self, key: &str, tag: Tag) -> Result<()> {
		trace!(key, tag = tag.name(), at = self.cursor.pos(), "skipping unknown field");
		self.skip_value(tag)
	}

	fn read_sized(&mut self, extra: usize) -> Result<&'a [u8]> {
		let at = self.cursor.pos();
		let len = self.cursor.read_i32_le()?;
		if len < 0 {
			return Err(BsonError::InvalidLength { at, len });
		}
		let total = len as usize + extra;
		let rem = self.frame_remaining();
		if total > rem {
			return Err(BsonError::FrameOverrun { at, len: total, rem });
		}
		let raw = self.cursor.read_exact(total)?;
		Ok(&raw[extra..])
	}

	fn skip_checked(&mut self, at: usize, len: usize) -> Result<()> {
		let rem = self.frame_remaining();
		if len > rem {
			return Err(BsonError::FrameOverrun { at, len, rem });
		}
		self.cursor.skip(len)
	}

	/// Bytes left before the end of the enclosing frame, or of the buffer at top level.
	fn frame_remaining(&self) -> usize {
		self.limit.saturating_sub(self.cursor.pos())
	}
}

/// Decode a top-level document (no tag/key prefix) with default options.
pub fn decode_document<T: BsonDocument>(bytes: &[u8]) -> Result<T> {
	decode_document_with(bytes, DecodeOptions::default())
}

/// Decode a top-level document with explicit options.
///
/// Bytes after the document terminator are rejected.
pub fn decode_document_with<T: BsonDocument>(bytes: &[u8], options: DecodeOptions) -> Result<T> {
	let mut reader = Reader::new(bytes, options);
	let value = T::decode_bson(&mut reader, Tag::Eoo)?;
	if reader.remaining() > 0 {
		return Err(BsonError::TrailingBytes { count: reader.remaining() });
	}
	Ok(value)
}

/// Decode one value of known outer `tag` as a dynamically typed [`Value`].
pub fn decode_value(bytes: &[u8], tag: Tag, options: DecodeOptions) -> Result<Value> {
	let mut reader = Reader::new(bytes, options);
	Value::decode_bson(&mut reader, tag)
}

#[cfg(test)]
mod tests;
