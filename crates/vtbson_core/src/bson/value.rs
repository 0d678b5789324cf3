use std::any::{Any, type_name};
use std::collections::BTreeMap;

use crate::bson::{Bson, BsonError, Reader, Result, Tag, Writer};

/// String-keyed mapping of dynamically typed values.
pub type Document = BTreeMap<String, Value>;

/// Dynamically typed value, resolved by tag at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// 32-bit signed integer.
	Int(i32),
	/// 64-bit signed integer.
	Long(i64),
	/// 64-bit unsigned integer.
	Ulong(u64),
	/// 64-bit float.
	Float(f64),
	/// Milliseconds since the Unix epoch.
	Datetime(i64),
	/// UTF-8 string.
	String(String),
	/// Opaque byte payload.
	Binary(Vec<u8>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Nested string-keyed mapping.
	Object(Document),
}

impl Value {
	/// Wire tag this value encodes with.
	pub fn tag(&self) -> Tag {
		match self {
			Self::Null => Tag::Null,
			Self::Bool(_) => Tag::Boolean,
			Self::Int(_) => Tag::Int,
			Self::Long(_) => Tag::Long,
			Self::Ulong(_) => Tag::Ulong,
			Self::Float(_) => Tag::Float,
			Self::Datetime(_) => Tag::Datetime,
			Self::String(_) => Tag::String,
			Self::Binary(_) => Tag::Binary,
			Self::Array(_) => Tag::Array,
			Self::Object(_) => Tag::Object,
		}
	}

	/// Borrow the string payload, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Widen any integer variant to `i64` when it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(i64::from(*value)),
			Self::Long(value) => Some(*value),
			Self::Ulong(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Number of nested frames needed to encode this value; 0 for scalars.
	pub fn frame_depth(&self) -> u32 {
		match self {
			Self::Array(items) => 1 + items.iter().map(Self::frame_depth).max().unwrap_or(0),
			Self::Object(document) => 1 + document.values().map(Self::frame_depth).max().unwrap_or(0),
			_ => 0,
		}
	}

	/// Return `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Convert a runtime value of a supported Rust type.
	///
	/// Supported: `String`, `&str`, `i32`, `i64`, `u64`, `f64`, `bool`, `Vec<u8>`, `()`,
	/// `Value`, `Vec<Value>` and [`Document`]. Any other type yields
	/// [`BsonError::UnsupportedRuntimeType`] naming it.
	pub fn try_from_any<T: Any>(value: &T) -> Result<Self> {
		let any = value as &dyn Any;
		if let Some(value) = any.downcast_ref::<Value>() {
			return Ok(value.clone());
		}
		if let Some(value) = any.downcast_ref::<String>() {
			return Ok(Self::String(value.clone()));
		}
		if let Some(value) = any.downcast_ref::<&'static str>() {
			return Ok(Self::String((*value).to_owned()));
		}
		if let Some(value) = any.downcast_ref::<i32>() {
			return Ok(Self::Int(*value));
		}
		if let Some(value) = any.downcast_ref::<i64>() {
			return Ok(Self::Long(*value));
		}
		if let Some(value) = any.downcast_ref::<u64>() {
			return Ok(Self::Ulong(*value));
		}
		if let Some(value) = any.downcast_ref::<f64>() {
			return Ok(Self::Float(*value));
		}
		if let Some(value) = any.downcast_ref::<bool>() {
			return Ok(Self::Bool(*value));
		}
		if let Some(value) = any.downcast_ref::<Vec<u8>>() {
			return Ok(Self::Binary(value.clone()));
		}
		if any.is::<()>() {
			return Ok(Self::Null);
		}
		if let Some(value) = any.downcast_ref::<Vec<Value>>() {
			return Ok(Self::Array(value.clone()));
		}
		if let Some(value) = any.downcast_ref::<Document>() {
			return Ok(Self::Object(value.clone()));
		}
		Err(BsonError::UnsupportedRuntimeType { type_name: type_name::<T>() })
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Long(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Document> for Value {
	fn from(value: Document) -> Self {
		Self::Object(value)
	}
}

impl Bson for Value {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		match self {
			Self::Null => writer.put_prefix(Tag::Null, key),
			Self::Bool(value) => value.encode_bson(writer, key),
			Self::Int(value) => value.encode_bson(writer, key),
			Self::Long(value) => value.encode_bson(writer, key),
			Self::Ulong(value) => value.encode_bson(writer, key),
			Self::Float(value) => value.encode_bson(writer, key),
			Self::Datetime(millis) => {
				writer.put_prefix(Tag::Datetime, key);
				writer.put_i64_le(*millis);
			}
			Self::String(value) => value.encode_bson(writer, key),
			Self::Binary(value) => {
				writer.put_prefix(Tag::Binary, key);
				writer.put_binary(value);
			}
			Self::Array(items) => items.encode_bson(writer, key),
			Self::Object(document) => document.encode_bson(writer, key),
		}
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		Ok(match tag {
			Tag::Null => Self::Null,
			Tag::Boolean => Self::Bool(reader.read_bool()?),
			Tag::Int => Self::Int(reader.read_i32()?),
			Tag::Long => Self::Long(reader.read_i64()?),
			Tag::Ulong => Self::Ulong(reader.read_u64()?),
			Tag::Float => Self::Float(reader.read_f64()?),
			Tag::Datetime => Self::Datetime(reader.read_i64()?),
			Tag::String => Self::String(reader.read_str()?.to_owned()),
			Tag::Binary => Self::Binary(reader.read_binary()?.to_vec()),
			Tag::Array => Self::Array(Vec::<Value>::decode_bson(reader, tag)?),
			Tag::Object | Tag::Eoo => Self::Object(Document::decode_bson(reader, tag)?),
		})
	}
}

#[cfg(test)]
mod tests;
