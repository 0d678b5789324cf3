//! Length-prefixed BSON document codec for vtgate routing payloads.

/// Wire format, generic value codec, and the record encode/decode engine.
pub mod bson;
/// Routing payload records exchanged with vtgate.
pub mod vtgate;
