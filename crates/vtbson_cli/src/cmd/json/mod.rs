use serde_json::{Map, Number, Value as JsonValue};
use vtbson::bson::{Document, Value};

use crate::error::{CliError, Result};

const BINARY_KEY: &str = "$binary";
const DATE_KEY: &str = "$date";
const OBJECT_KEY: &str = "$object";

/// Render a decoded document as a JSON object.
pub fn document_to_json(document: &Document) -> JsonValue {
	let fields: Map<String, JsonValue> = document.iter().map(|(key, value)| (key.clone(), value_to_json(value))).collect();
	JsonValue::Object(fields)
}

/// Render one decoded value. BINARY and DATETIME use `$binary`/`$date` wrappers.
///
/// A nested object whose only key is a wrapper name is escaped as
/// `{"$object": {...}}` so [`json_to_document`] reads it back as an object.
pub fn value_to_json(value: &Value) -> JsonValue {
	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => JsonValue::Bool(*v),
		Value::Int(v) => JsonValue::from(*v),
		Value::Long(v) => JsonValue::from(*v),
		Value::Ulong(v) => JsonValue::from(*v),
		Value::Float(v) => Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
		Value::Datetime(v) => wrapper(DATE_KEY, JsonValue::from(*v)),
		Value::String(v) => JsonValue::String(v.clone()),
		Value::Binary(v) => wrapper(BINARY_KEY, JsonValue::String(hex::encode(v))),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Object(document) if is_wrapper_shaped(document) => wrapper(OBJECT_KEY, document_to_json(document)),
		Value::Object(document) => document_to_json(document),
	}
}

/// Convert a JSON object into a generic document.
pub fn json_to_document(json: &JsonValue) -> Result<Document> {
	match json {
		JsonValue::Object(fields) => object_to_document(fields, ""),
		other => Err(CliError::NotAnObject { found: json_kind(other) }),
	}
}

fn object_to_document(fields: &Map<String, JsonValue>, path: &str) -> Result<Document> {
	let mut out = Document::new();
	for (key, value) in fields {
		if key.contains('\0') {
			return Err(CliError::NulInKey { key: key.clone() });
		}
		let child_path = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
		out.insert(key.clone(), json_to_value(value, &child_path)?);
	}
	Ok(out)
}

fn json_to_value(json: &JsonValue, path: &str) -> Result<Value> {
	Ok(match json {
		JsonValue::Null => Value::Null,
		JsonValue::Bool(v) => Value::Bool(*v),
		JsonValue::Number(number) => number_to_value(number),
		JsonValue::String(v) => Value::String(v.clone()),
		JsonValue::Array(items) => Value::Array(
			items
				.iter()
				.enumerate()
				.map(|(index, item)| json_to_value(item, &format!("{path}.{index}")))
				.collect::<Result<_>>()?,
		),
		JsonValue::Object(fields) => match single_entry(fields) {
			Some((BINARY_KEY, JsonValue::String(text))) => Value::Binary(hex::decode(text).map_err(|source| CliError::InvalidHex {
				key: path.to_owned(),
				source,
			})?),
			Some((DATE_KEY, millis)) => Value::Datetime(millis.as_i64().ok_or_else(|| CliError::InvalidDate { key: path.to_owned() })?),
			Some((OBJECT_KEY, JsonValue::Object(inner))) => Value::Object(object_to_document(inner, path)?),
			_ => Value::Object(object_to_document(fields, path)?),
		},
	})
}

fn number_to_value(number: &Number) -> Value {
	if let Some(v) = number.as_i64() {
		Value::Long(v)
	} else if let Some(v) = number.as_u64() {
		Value::Ulong(v)
	} else {
		Value::Float(number.as_f64().unwrap_or(f64::NAN))
	}
}

fn single_entry(fields: &Map<String, JsonValue>) -> Option<(&str, &JsonValue)> {
	let mut iter = fields.iter();
	let (key, value) = iter.next()?;
	if iter.next().is_some() {
		return None;
	}
	Some((key.as_str(), value))
}

fn is_wrapper_shaped(document: &Document) -> bool {
	let mut keys = document.keys();
	matches!((keys.next().map(String::as_str), keys.next()), (Some(BINARY_KEY | DATE_KEY | OBJECT_KEY), None))
}

fn wrapper(key: &str, value: JsonValue) -> JsonValue {
	let mut out = Map::new();
	out.insert(key.to_owned(), value);
	JsonValue::Object(out)
}

fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
