use std::collections::BTreeMap;

use vtbson_testkit::RawDoc;

use crate::bson::{BsonError, DecodeOptions, Document, Tag, Value, decode_document, decode_document_with, encode_document};

#[test]
fn try_from_any_maps_supported_types() {
	assert_eq!(Value::try_from_any(&"hi".to_owned()).expect("string"), Value::from("hi"));
	assert_eq!(Value::try_from_any(&"hi").expect("str"), Value::from("hi"));
	assert_eq!(Value::try_from_any(&7_i32).expect("i32"), Value::Int(7));
	assert_eq!(Value::try_from_any(&7_i64).expect("i64"), Value::Long(7));
	assert_eq!(Value::try_from_any(&7_u64).expect("u64"), Value::Ulong(7));
	assert_eq!(Value::try_from_any(&0.5_f64).expect("f64"), Value::Float(0.5));
	assert_eq!(Value::try_from_any(&true).expect("bool"), Value::Bool(true));
	assert_eq!(Value::try_from_any(&vec![1_u8, 2]).expect("bytes"), Value::Binary(vec![1, 2]));
	assert_eq!(Value::try_from_any(&()).expect("unit"), Value::Null);
	assert_eq!(Value::try_from_any(&Value::Datetime(3)).expect("value"), Value::Datetime(3));
	assert_eq!(Value::try_from_any(&vec![Value::Null]).expect("array"), Value::Array(vec![Value::Null]));
	assert_eq!(Value::try_from_any(&Document::new()).expect("document"), Value::Object(Document::new()));
}

#[test]
fn try_from_any_rejects_unmapped_types() {
	let err = Value::try_from_any(&1_u16).expect_err("u16 has no tag");
	assert!(matches!(err, BsonError::UnsupportedRuntimeType { type_name: "u16" }));
	assert!(!err.is_malformed_framing());

	let err = Value::try_from_any(&vec![1_i64]).expect_err("Vec<i64> has no tag");
	assert!(matches!(err, BsonError::UnsupportedRuntimeType { type_name } if type_name.contains("Vec<i64>")));
}

#[test]
fn decodes_every_tag() {
	let bytes = RawDoc::new()
		.float("f", 2.5)
		.string("s", "str")
		.object("o", &RawDoc::new().null("n"))
		.array("a", &RawDoc::new().int("0", 1).string("1", "x"))
		.binary("b", &[0xDE, 0xAD])
		.boolean("t", true)
		.datetime("d", 1_600_000_000_000)
		.null("z")
		.int("i", -1)
		.ulong("u", u64::MAX)
		.long("l", i64::MIN)
		.build();

	let doc: Document = decode_document(&bytes).expect("document decodes");
	let mut object = Document::new();
	object.insert("n".to_owned(), Value::Null);

	assert_eq!(doc["f"], Value::Float(2.5));
	assert_eq!(doc["s"], Value::from("str"));
	assert_eq!(doc["o"], Value::Object(object));
	assert_eq!(doc["a"], Value::Array(vec![Value::Int(1), Value::from("x")]));
	assert_eq!(doc["b"], Value::Binary(vec![0xDE, 0xAD]));
	assert_eq!(doc["t"], Value::Bool(true));
	assert_eq!(doc["d"], Value::Datetime(1_600_000_000_000));
	assert_eq!(doc["z"], Value::Null);
	assert_eq!(doc["i"], Value::Int(-1));
	assert_eq!(doc["u"], Value::Ulong(u64::MAX));
	assert_eq!(doc["l"], Value::Long(i64::MIN));
	assert_eq!(doc.len(), 11);
}

#[test]
fn datetime_and_binary_keep_their_tags() {
	let mut doc = BTreeMap::new();
	doc.insert("when".to_owned(), Value::Datetime(-5));
	doc.insert("blob".to_owned(), Value::Binary(Vec::new()));

	let bytes = encode_document(&doc);
	let expected = RawDoc::new().binary("blob", &[]).datetime("when", -5).build();
	assert_eq!(bytes, expected);

	let decoded: Document = decode_document(&bytes).expect("document decodes");
	assert_eq!(decoded, doc);
	assert_eq!(decoded["when"].tag(), Tag::Datetime);
}

#[test]
fn accessors() {
	assert_eq!(Value::from("a").as_str(), Some("a"));
	assert_eq!(Value::Int(3).as_i64(), Some(3));
	assert_eq!(Value::Ulong(u64::MAX).as_i64(), None);
	assert_eq!(Value::Bool(true).as_i64(), None);
	assert!(Value::Null.is_null());
}

/// Top-level document whose encoding spans `frames` frames.
fn nested_document(frames: u32) -> Document {
	let mut doc = Document::new();
	doc.insert("leaf".to_owned(), Value::Int(1));
	for _ in 1..frames {
		let mut outer = Document::new();
		outer.insert("o".to_owned(), Value::Object(doc));
		doc = outer;
	}
	doc
}

#[test]
fn frame_depth_counts_containers() {
	assert_eq!(Value::Long(1).frame_depth(), 0);
	assert_eq!(Value::Array(Vec::new()).frame_depth(), 1);
	assert_eq!(Value::Array(vec![Value::Null, Value::Object(Document::new())]).frame_depth(), 2);
	assert_eq!(Value::Object(nested_document(64)).frame_depth(), 64);
}

#[test]
fn default_decode_round_trips_up_to_max_depth() {
	let doc = nested_document(64);
	let decoded: Document = decode_document(&encode_document(&doc)).expect("64 frames decode");
	assert_eq!(decoded, doc);
}

#[test]
fn deeper_documents_need_a_raised_limit() {
	let doc = nested_document(65);
	let bytes = encode_document(&doc);

	let err = decode_document::<Document>(&bytes).expect_err("65 frames exceed the default");
	assert!(matches!(err, BsonError::DecodeDepthExceeded { max_depth: 64 }));

	let options = DecodeOptions {
		max_depth: Value::Object(doc.clone()).frame_depth(),
		..DecodeOptions::default()
	};
	let decoded: Document = decode_document_with(&bytes, options).expect("raised limit decodes");
	assert_eq!(decoded, doc);
}
