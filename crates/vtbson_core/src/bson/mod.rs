mod bytes;
mod codec;
mod decode;
mod encode;
mod error;
mod record;
mod tag;
mod value;
mod writer;

/// Bounded read cursor over an encoded buffer.
pub use bytes::Cursor;
/// Per-type encode/decode delegation traits.
pub use codec::{Bson, BsonDocument};
/// Decoding entry points, reader state, and options.
pub use decode::{DecodeOptions, OpenFrame, Reader, decode_document, decode_document_with, decode_value};
/// Encoding entry points.
pub use encode::{encode_document, encode_document_into};
/// Error and result aliases.
pub use error::{BsonError, Result};
/// Field-table record engine.
pub use record::{Field, Record, decode_record, encode_record};
/// Wire type tags.
pub use tag::Tag;
/// Dynamically typed values.
pub use value::{Document, Value};
/// Output buffer with frame back-patching.
pub use writer::{Frame, Writer};
