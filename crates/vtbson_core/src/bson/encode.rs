use crate::bson::{BsonDocument, Writer};

/// Encode a top-level document: `[len][entries][0x00]` with no tag or key prefix.
///
/// Nesting is not limited here. A document with more frames than
/// [`DecodeOptions::max_depth`](crate::bson::DecodeOptions::max_depth), the
/// top-level frame included, only decodes with a raised limit.
pub fn encode_document<T: BsonDocument>(document: &T) -> Vec<u8> {
	let mut writer = Writer::with_capacity(64);
	encode_document_into(document, &mut writer);
	writer.into_bytes()
}

/// Append a top-level document to an existing writer.
pub fn encode_document_into<T: BsonDocument>(document: &T, writer: &mut Writer) {
	document.encode_body(writer);
}
