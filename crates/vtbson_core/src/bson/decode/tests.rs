use vtbson_testkit::RawDoc;

use crate::bson::{BsonError, DecodeOptions, Document, Reader, Tag, Value, decode_document, decode_document_with, decode_value};

fn nested(levels: usize) -> RawDoc {
	let mut doc = RawDoc::new().int("leaf", 1);
	for _ in 0..levels {
		doc = RawDoc::new().object("o", &doc);
	}
	doc
}

#[test]
fn empty_document_decodes() {
	let doc: Document = decode_document(&[1, 0, 0, 0, 0]).expect("empty doc decodes");
	assert!(doc.is_empty());
}

#[test]
fn truncated_header_is_eof() {
	let err = decode_document::<Document>(&[5, 0]).expect_err("short header should fail");
	assert!(matches!(err, BsonError::UnexpectedEof { at: 0, need: 4, rem: 2 }));
}

#[test]
fn length_past_buffer_is_overrun() {
	let mut bytes = RawDoc::new().long("n", 1).build();
	bytes.pop();
	let err = decode_document::<Document>(&bytes).expect_err("truncated doc should fail");
	assert!(matches!(err, BsonError::FrameOverrun { at: 0, .. }));
	assert!(err.is_malformed_framing());
}

#[test]
fn non_positive_length_is_invalid() {
	for len in [0, -1, i32::MIN] {
		let bytes = RawDoc::new().build_with_len(len);
		let err = decode_document::<Document>(&bytes).expect_err("bad length should fail");
		assert!(matches!(err, BsonError::InvalidLength { at: 0, len: found } if found == len));
	}
}

#[test]
fn unregistered_tag_is_fatal() {
	let bytes = RawDoc::new().entry(0x07, "oid", &[0; 12]).build();
	let err = decode_document::<Document>(&bytes).expect_err("unknown tag should fail");
	assert!(matches!(err, BsonError::UnknownTag { tag: 0x07, at: 4 }));
}

#[test]
fn key_without_terminator_is_rejected() {
	let bytes = [5, 0, 0, 0, 0x02, b'a', b'b', b'c', b'd'];
	let err = decode_document::<Document>(&bytes).expect_err("unterminated key should fail");
	assert!(matches!(err, BsonError::UnterminatedKey { at: 5 }));
}

#[test]
fn key_with_invalid_utf8_is_rejected() {
	let bytes = RawDoc::new().raw(&[0x0A, 0xFF, 0xFE, 0x00]).build();
	let err = decode_document::<Document>(&bytes).expect_err("bad key should fail");
	assert!(matches!(err, BsonError::InvalidUtf8 { at: 5 }));
}

#[test]
fn trailing_bytes_after_document_are_rejected() {
	let mut bytes = RawDoc::new().boolean("b", true).build();
	bytes.extend_from_slice(&[0xFF, 0xFF]);
	let err = decode_document::<Document>(&bytes).expect_err("trailing bytes should fail");
	assert!(matches!(err, BsonError::TrailingBytes { count: 2 }));
}

#[test]
fn depth_limit_counts_every_frame() {
	let options = DecodeOptions {
		max_depth: 3,
		..DecodeOptions::default()
	};

	let ok = nested(2).build();
	decode_document_with::<Document>(&ok, options.clone()).expect("three frames fit");

	let deep = nested(3).build();
	let err = decode_document_with::<Document>(&deep, options).expect_err("four frames exceed limit");
	assert!(matches!(err, BsonError::DecodeDepthExceeded { max_depth: 3 }));
}

#[test]
fn default_depth_rejects_pathological_nesting() {
	let bytes = nested(200).build();
	let err = decode_document::<Document>(&bytes).expect_err("deep nesting should fail");
	assert!(matches!(err, BsonError::DecodeDepthExceeded { max_depth: 64 }));
}

fn overlong_inner_frame() -> Vec<u8> {
	// Inner frame declares 12 bytes: its terminator plus the 11-byte "n" entry that follows it.
	RawDoc::new().entry(0x03, "o", &[12, 0, 0, 0, 0x00]).long("n", 5).build()
}

#[test]
fn lenient_frames_resume_after_inner_terminator() {
	let doc: Document = decode_document(&overlong_inner_frame()).expect("overlong frame decodes");
	assert_eq!(doc.get("o"), Some(&Value::Object(Document::new())));
	assert_eq!(doc.get("n"), Some(&Value::Long(5)));
}

#[test]
fn strict_frames_reject_surplus_declared_length() {
	let err = decode_document_with::<Document>(&overlong_inner_frame(), DecodeOptions::strict()).expect_err("strict mode should fail");
	assert!(matches!(
		err,
		BsonError::FrameLengthMismatch {
			at: 7,
			declared: 12,
			consumed: 1
		}
	));
}

#[test]
fn surplus_inner_bytes_are_not_skipped() {
	let bytes = RawDoc::new().entry(0x03, "o", &[3, 0, 0, 0, 0x00, 0xAA, 0xBB]).build();
	let err = decode_document::<Document>(&bytes).expect_err("garbage after inner terminator should fail");
	assert!(matches!(err, BsonError::UnknownTag { tag: 0xAA, at: 12 }));
}

#[test]
fn inner_frame_is_bounded_by_parent() {
	let mut bytes = RawDoc::new().entry(0x03, "o", &[20, 0, 0, 0, 0x00]).build();
	bytes.extend_from_slice(&[0; 30]);
	let err = decode_document::<Document>(&bytes).expect_err("inner frame past parent should fail");
	assert!(matches!(err, BsonError::FrameOverrun { at: 7, len: 20, rem: 2 }));
}

#[test]
fn inner_string_is_bounded_by_parent() {
	let inner = [9, 0, 0, 0, 0x02, b's', 0, 40, 0, 0, 0, 0];
	let mut bytes = RawDoc::new().entry(0x03, "o", &inner).build();
	bytes.extend_from_slice(&[b'x'; 64]);
	let err = decode_document::<Document>(&bytes).expect_err("string past its frame should fail");
	assert!(matches!(err, BsonError::FrameOverrun { at: 14, len: 40, .. }));
}

#[test]
fn top_level_surplus_is_skipped_unless_strict() {
	let mut bytes = RawDoc::new().long("n", 1).build();
	let len = i32::try_from(bytes.len() - 4 + 2).expect("fits");
	bytes[..4].copy_from_slice(&len.to_le_bytes());
	bytes.extend_from_slice(&[0xAA, 0xBB]);

	let doc: Document = decode_document(&bytes).expect("lenient top level skips surplus");
	assert_eq!(doc.get("n"), Some(&Value::Long(1)));

	let err = decode_document_with::<Document>(&bytes, DecodeOptions::strict()).expect_err("strict top level should fail");
	assert!(matches!(err, BsonError::FrameLengthMismatch { at: 0, .. }));
}

#[test]
fn entries_past_declared_end_always_fail() {
	let short_inner = [1, 0, 0, 0, 0x08, b'b', 0, 1, 0];
	let bytes = RawDoc::new().entry(0x03, "o", &short_inner).build();
	let err = decode_document::<Document>(&bytes).expect_err("overlong entries should fail");
	assert!(matches!(err, BsonError::FrameLengthMismatch { at: 7, declared: 1, consumed: 5 }));
}

#[test]
fn skip_value_consumes_each_tag_exactly() {
	let inner = RawDoc::new().string("s", "x").build();
	let cases: Vec<(Tag, Vec<u8>)> = vec![
		(Tag::Null, Vec::new()),
		(Tag::Boolean, vec![1]),
		(Tag::Int, 7_i32.to_le_bytes().to_vec()),
		(Tag::Long, 7_i64.to_le_bytes().to_vec()),
		(Tag::Ulong, 7_u64.to_le_bytes().to_vec()),
		(Tag::Float, 1.5_f64.to_le_bytes().to_vec()),
		(Tag::Datetime, 1_i64.to_le_bytes().to_vec()),
		(Tag::String, vec![2, 0, 0, 0, b'h', b'i']),
		(Tag::Binary, vec![2, 0, 0, 0, 0x00, 0xAB, 0xCD]),
		(Tag::Object, inner.clone()),
		(Tag::Array, inner),
	];

	for (tag, payload) in cases {
		let mut bytes = payload.clone();
		bytes.push(0xEE);
		let mut reader = Reader::new(&bytes, DecodeOptions::default());
		reader.skip_value(tag).unwrap_or_else(|err| panic!("skip {tag} failed: {err}"));
		assert_eq!(reader.pos(), payload.len(), "skip {tag} consumed wrong width");
	}
}

#[test]
fn skip_value_checks_lengths_against_buffer() {
	let mut reader = Reader::new(&[9, 0, 0, 0, b'x'], DecodeOptions::default());
	let err = reader.skip_value(Tag::String).expect_err("long string should fail");
	assert!(matches!(err, BsonError::FrameOverrun { at: 0, len: 9, rem: 1 }));

	let mut reader = Reader::new(&[40, 0, 0, 0, 0], DecodeOptions::default());
	let err = reader.skip_value(Tag::Object).expect_err("long object should fail");
	assert!(matches!(err, BsonError::FrameOverrun { at: 0, len: 40, rem: 1 }));

	let mut reader = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF], DecodeOptions::default());
	let err = reader.skip_value(Tag::Binary).expect_err("negative binary should fail");
	assert!(matches!(err, BsonError::InvalidLength { at: 0, len: -1 }));
}

#[test]
fn string_payload_must_be_utf8() {
	let mut reader = Reader::new(&[2, 0, 0, 0, 0xC3, 0x28], DecodeOptions::default());
	let err = reader.read_str().expect_err("invalid utf-8 should fail");
	assert!(matches!(err, BsonError::InvalidUtf8 { at: 0 }));
}

#[test]
fn nonzero_boolean_byte_is_true() {
	let mut reader = Reader::new(&[0x02, 0x00], DecodeOptions::default());
	assert!(reader.read_bool().expect("first bool"));
	assert!(!reader.read_bool().expect("second bool"));
}

#[test]
fn decode_value_reads_bare_scalars() {
	let value = decode_value(&(-7_i64).to_le_bytes(), Tag::Long, DecodeOptions::default()).expect("long decodes");
	assert_eq!(value, Value::Long(-7));

	let value = decode_value(&[], Tag::Null, DecodeOptions::default()).expect("null decodes");
	assert!(value.is_null());
}
