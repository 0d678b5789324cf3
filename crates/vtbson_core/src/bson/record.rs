use crate::bson::{BsonError, Reader, Result, Tag, Writer};

/// One entry of a record's static field table.
pub struct Field<R> {
	/// Wire key of the field.
	pub key: &'static str,
	/// Append the field as an entry named `key`.
	pub encode: fn(&R, &mut Writer, &'static str),
	/// Decode an entry tagged `tag` into the field.
	pub decode: fn(&mut R, &mut Reader<'_>, Tag) -> Result<()>,
}

/// Struct-shaped type encoded through the generic record engine.
///
/// Implementations are normally generated with [`bson_record!`](crate::bson_record).
pub trait Record: Default + 'static {
	/// Type label used in diagnostics.
	const NAME: &'static str;
	/// Declared fields in wire order.
	const FIELDS: &'static [Field<Self>];
}

/// Write the framed body of `record`: every declared field in table order, then the terminator.
pub fn encode_record<R: Record>(record: &R, writer: &mut Writer) {
	let frame = writer.begin_frame();
	for field in R::FIELDS {
		(field.encode)(record, writer, field.key);
	}
	writer.end_frame(frame);
}

/// Decode a record value whose entry carried `tag`.
///
/// Keys may arrive in any order, the last duplicate wins, and keys missing
/// from the table are skipped. A NULL tag yields the default record.
pub fn decode_record<R: Record>(reader: &mut Reader<'_>, tag: Tag) -> Result<R> {
	match tag {
		Tag::Object | Tag::Eoo => {}
		Tag::Null => return Ok(R::default()),
		other => return Err(BsonError::unexpected_tag(R::NAME, other)),
	}

	let mut record = R::default();
	reader.read_entries(|reader, tag, key| match R::FIELDS.iter().find(|field| field.key == key) {
		Some(field) => (field.decode)(&mut record, reader, tag).map_err(|err| err.in_field(R::NAME, field.key)),
		None => reader.skip_unknown(key, tag),
	})?;
	Ok(record)
}

/// Declare the field table of a record and derive its codec impls.
///
/// ```
/// use vtbson::bson::{decode_document, encode_document};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Shard {
/// 	name: String,
/// 	weight: i64,
/// }
///
/// vtbson::bson_record!(Shard {
/// 	"Name" => name,
/// 	"Weight" => weight,
/// });
///
/// let shard = Shard { name: "-80".to_owned(), weight: 3 };
/// let bytes = encode_document(&shard);
/// assert_eq!(decode_document::<Shard>(&bytes).unwrap(), shard);
/// ```
#[macro_export]
macro_rules! bson_record {
	($record:ident { $($key:literal => $field:ident),+ $(,)? }) => {
		impl $crate::bson::Record for $record {
			const NAME: &'static str = stringify!($record);
			const FIELDS: &'static [$crate::bson::Field<Self>] = &[$(
				$crate::bson::Field {
					key: $key,
					encode: |record, writer, key| $crate::bson::Bson::encode_bson(&record.$field, writer, key),
					decode: |record, reader, tag| {
						record.$field = $crate::bson::Bson::decode_bson(reader, tag)?;
						Ok(())
					},
				},
			)+];
		}

		impl $crate::bson::Bson for $record {
			fn encode_bson(&self, writer: &mut $crate::bson::Writer, key: &str) {
				writer.put_prefix($crate::bson::Tag::Object, key);
				$crate::bson::encode_record(self, writer);
			}

			fn decode_bson(reader: &mut $crate::bson::Reader<'_>, tag: $crate::bson::Tag) -> $crate::bson::Result<Self> {
				$crate::bson::decode_record(reader, tag)
			}
		}

		impl $crate::bson::BsonDocument for $record {
			fn encode_body(&self, writer: &mut $crate::bson::Writer) {
				$crate::bson::encode_record(self, writer);
			}
		}
	};
}
