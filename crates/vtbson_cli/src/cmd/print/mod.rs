use std::fmt::Write as _;

use vtbson::bson::{Document, Value};

use crate::cmd::util::hex_preview;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays and objects.
	pub max_items: usize,
	/// Maximum number of bytes shown for binary payloads.
	pub max_binary_bytes: usize,
	/// Maximum recursive print depth for nested arrays/objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_items: 64,
			max_binary_bytes: 32,
			max_print_depth: 8,
		}
	}
}

/// Render a top-level document as an indented tree.
pub fn render_document(document: &Document, options: PrintOptions) -> String {
	let mut out = String::new();
	render_entries(&mut out, document, 0, 0, options);
	out
}

/// Print a top-level document on stdout.
pub fn print_document(document: &Document, options: PrintOptions) {
	print!("{}", render_document(document, options));
}

fn render_entries(out: &mut String, document: &Document, indent: usize, depth: u32, options: PrintOptions) {
	for (key, value) in document.iter().take(options.max_items) {
		render_value(out, key, value, indent, depth, options);
	}
	if document.len() > options.max_items {
		let _ = writeln!(out, "{}... {} more", " ".repeat(indent), document.len() - options.max_items);
	}
}

fn render_value(out: &mut String, label: &str, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let _ = match value {
		Value::Null => writeln!(out, "{pad}{label}: null"),
		Value::Bool(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Int(v) => writeln!(out, "{pad}{label}: {v} (int)"),
		Value::Long(v) => writeln!(out, "{pad}{label}: {v}"),
		Value::Ulong(v) => writeln!(out, "{pad}{label}: {v} (ulong)"),
		Value::Float(v) => writeln!(out, "{pad}{label}: {v:?}"),
		Value::Datetime(v) => writeln!(out, "{pad}{label}: datetime({v})"),
		Value::String(v) => writeln!(out, "{pad}{label}: \"{}\"", truncate(v, options.max_string_len)),
		Value::Binary(v) => writeln!(out, "{pad}{label}: binary[{}] {}", v.len(), hex_preview(v, options.max_binary_bytes)),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{label}: [... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}{label}: [");
			for (index, item) in items.iter().enumerate().take(options.max_items) {
				render_value(out, &index.to_string(), item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_items);
			}
			writeln!(out, "{pad}]")
		}
		Value::Object(document) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}{label}: {{ ... {} fields }}", document.len());
				return;
			}
			let _ = writeln!(out, "{pad}{label}: {{");
			render_entries(out, document, indent + 2, depth + 1, options);
			writeln!(out, "{pad}}}")
		}
	};
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
