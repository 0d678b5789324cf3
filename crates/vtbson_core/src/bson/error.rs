use thiserror::Error;

use crate::bson::Tag;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BsonError>;

/// Errors produced while encoding and decoding documents.
#[derive(Debug, Error)]
pub enum BsonError {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Field key ran to the end of the buffer without a NUL terminator.
	#[error("unterminated key at offset {at}")]
	UnterminatedKey {
		/// Byte offset where the key starts.
		at: usize,
	},
	/// Length prefix was negative or too small for its value kind.
	#[error("invalid length {len} at offset {at}")]
	InvalidLength {
		/// Offset of the length prefix.
		at: usize,
		/// Parsed signed length.
		len: i32,
	},
	/// Length prefix points past the end of the buffer.
	#[error("length {len} at offset {at} exceeds remaining {rem}")]
	FrameOverrun {
		/// Offset of the length prefix.
		at: usize,
		/// Declared length.
		len: usize,
		/// Bytes remaining after the prefix.
		rem: usize,
	},
	/// Entries of a frame did not consume exactly the declared length.
	#[error("frame at offset {at} declared {declared} bytes, entries consumed {consumed}")]
	FrameLengthMismatch {
		/// Offset of the frame length prefix.
		at: usize,
		/// Declared frame length.
		declared: usize,
		/// Bytes actually consumed by entries and terminator.
		consumed: usize,
	},
	/// Tag byte is not part of the registry.
	#[error("unknown tag 0x{tag:02x} at offset {at}")]
	UnknownTag {
		/// Raw tag byte.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Key or string payload was not valid UTF-8.
	#[error("invalid utf-8 at offset {at}")]
	InvalidUtf8 {
		/// Offset of the offending payload.
		at: usize,
	},
	/// Bytes remained after the top-level document terminator.
	#[error("{count} trailing bytes after document")]
	TrailingBytes {
		/// Number of unread bytes.
		count: usize,
	},
	/// Frame nesting exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Runtime value has no tag mapping.
	#[error("unsupported runtime type {type_name}")]
	UnsupportedRuntimeType {
		/// Rust type name of the offending value.
		type_name: &'static str,
	},
	/// Wire tag does not match the static type of the target.
	#[error("unexpected tag {found} for {key}: expected {expected}")]
	UnexpectedTag {
		/// Qualified `Record.Field` key, empty until attached by the record engine.
		key: String,
		/// Expected logical kind.
		expected: &'static str,
		/// Tag found on the wire.
		found: Tag,
	},
	/// Enum string did not name a known variant.
	#[error("unknown {type_name} value {value:?}")]
	UnknownEnumValue {
		/// Enum type name.
		type_name: &'static str,
		/// Wire value.
		value: String,
	},
}

impl BsonError {
	/// Return `true` for errors caused by inconsistent lengths, tags, or bytes on the wire.
	pub fn is_malformed_framing(&self) -> bool {
		matches!(
			self,
			Self::UnexpectedEof { .. }
				| Self::UnterminatedKey { .. }
				| Self::InvalidLength { .. }
				| Self::FrameOverrun { .. }
				| Self::FrameLengthMismatch { .. }
				| Self::UnknownTag { .. }
				| Self::InvalidUtf8 { .. }
				| Self::TrailingBytes { .. }
				| Self::DecodeDepthExceeded { .. }
		)
	}

	pub(crate) fn unexpected_tag(expected: &'static str, found: Tag) -> Self {
		Self::UnexpectedTag {
			key: String::new(),
			expected,
			found,
		}
	}

	/// Attach `record.field` to a tag mismatch raised by a nested scalar decoder.
	pub(crate) fn in_field(self, record: &str, field: &str) -> Self {
		match self {
			Self::UnexpectedTag { key, expected, found } if key.is_empty() => Self::UnexpectedTag {
				key: format!("{record}.{field}"),
				expected,
				found,
			},
			other => other,
		}
	}
}
