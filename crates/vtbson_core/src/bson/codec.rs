use std::collections::BTreeMap;

use crate::bson::{BsonError, Reader, Result, Tag, Writer};

/// Types that encode themselves as one `(tag, key, value)` entry and decode from a tagged value.
///
/// Composite codecs call this trait on their members, which is what lets records,
/// enums, arrays and maps nest to any depth without duplicating framing logic.
pub trait Bson: Sized {
	/// Append this value as an entry named `key`.
	fn encode_bson(&self, writer: &mut Writer, key: &str);

	/// Decode a value whose entry carried `tag`.
	///
	/// A [`Tag::Null`] is accepted by every implementation and yields its empty state.
	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self>;
}

/// Values that can stand as a top-level document: a bare frame without tag or key.
///
/// Their [`Bson::decode_bson`] accepts [`Tag::Eoo`] as the top-level outer tag.
pub trait BsonDocument: Bson {
	/// Append the framed entries without a `(tag, key)` prefix.
	fn encode_body(&self, writer: &mut Writer);
}

impl Bson for String {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::String, key);
		writer.put_string(self);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::String => Ok(reader.read_str()?.to_owned()),
			Tag::Binary => {
				let at = reader.pos();
				let raw = reader.read_binary()?;
				String::from_utf8(raw.to_vec()).map_err(|_| BsonError::InvalidUtf8 { at })
			}
			Tag::Null => Ok(String::new()),
			other => Err(BsonError::unexpected_tag("string", other)),
		}
	}
}

impl Bson for i64 {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Long, key);
		writer.put_i64_le(*self);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Long => reader.read_i64(),
			Tag::Int => Ok(i64::from(reader.read_i32()?)),
			Tag::Null => Ok(0),
			other => Err(BsonError::unexpected_tag("long", other)),
		}
	}
}

impl Bson for i32 {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Int, key);
		writer.put_i32_le(*self);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Int => reader.read_i32(),
			Tag::Null => Ok(0),
			other => Err(BsonError::unexpected_tag("int", other)),
		}
	}
}

impl Bson for u64 {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Ulong, key);
		writer.put_u64_le(*self);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Ulong => reader.read_u64(),
			Tag::Null => Ok(0),
			other => Err(BsonError::unexpected_tag("ulong", other)),
		}
	}
}

impl Bson for f64 {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Float, key);
		writer.put_f64_le(*self);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Float => reader.read_f64(),
			Tag::Null => Ok(0.0),
			other => Err(BsonError::unexpected_tag("float", other)),
		}
	}
}

impl Bson for bool {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Boolean, key);
		writer.put_u8(u8::from(*self));
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Boolean => reader.read_bool(),
			Tag::Null => Ok(false),
			other => Err(BsonError::unexpected_tag("boolean", other)),
		}
	}
}

/// `None` is written as an explicit NULL entry and a NULL entry decodes back to `None`.
impl<T: Bson> Bson for Option<T> {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		match self {
			Some(value) => value.encode_bson(writer, key),
			None => writer.put_prefix(Tag::Null, key),
		}
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Null => Ok(None),
			other => T::decode_bson(reader, other).map(Some),
		}
	}
}

/// Arrays are framed like objects keyed `"0"`, `"1"`, …; index keys are ignored on decode.
impl<T: Bson> Bson for Vec<T> {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Array, key);
		let frame = writer.begin_frame();
		for (index, item) in self.iter().enumerate() {
			item.encode_bson(writer, &index.to_string());
		}
		writer.end_frame(frame);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Array => {
				let mut out = Vec::new();
				reader.read_entries(|reader, tag, _index| {
					out.push(T::decode_bson(reader, tag)?);
					Ok(())
				})?;
				Ok(out)
			}
			Tag::Null => Ok(Vec::new()),
			other => Err(BsonError::unexpected_tag("array", other)),
		}
	}
}

/// Maps encode one entry per key; duplicate keys on the wire keep the last value.
impl<V: Bson> Bson for BTreeMap<String, V> {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Object, key);
		self.encode_body(writer);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Object | Tag::Eoo => {
				let mut out = BTreeMap::new();
				reader.read_entries(|reader, tag, key| {
					out.insert(key.to_owned(), V::decode_bson(reader, tag)?);
					Ok(())
				})?;
				Ok(out)
			}
			Tag::Null => Ok(BTreeMap::new()),
			other => Err(BsonError::unexpected_tag("object", other)),
		}
	}
}

impl<V: Bson> BsonDocument for BTreeMap<String, V> {
	fn encode_body(&self, writer: &mut Writer) {
		let frame = writer.begin_frame();
		for (entry_key, value) in self {
			value.encode_bson(writer, entry_key);
		}
		writer.end_frame(frame);
	}
}
