use std::fmt;

/// One-byte wire type identifier preceding every entry.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
	/// End-of-object marker. Also passed as the outer tag of a prefix-less top-level document.
	Eoo = 0x00,
	/// 8-byte IEEE-754 double.
	Float = 0x01,
	/// Length-prefixed UTF-8 string.
	String = 0x02,
	/// Framed nested object.
	Object = 0x03,
	/// Framed nested array with decimal index keys.
	Array = 0x04,
	/// Length-prefixed byte payload with a subtype byte.
	Binary = 0x05,
	/// One-byte boolean.
	Boolean = 0x08,
	/// 8-byte signed milliseconds since the Unix epoch.
	Datetime = 0x09,
	/// Null, no value bytes.
	Null = 0x0A,
	/// 4-byte signed integer.
	Int = 0x10,
	/// 8-byte unsigned integer.
	Ulong = 0x11,
	/// 8-byte signed integer.
	Long = 0x12,
}

impl Tag {
	/// Map a raw tag byte to the registry, if known.
	pub fn from_byte(byte: u8) -> Option<Self> {
		Some(match byte {
			0x00 => Self::Eoo,
			0x01 => Self::Float,
			0x02 => Self::String,
			0x03 => Self::Object,
			0x04 => Self::Array,
			0x05 => Self::Binary,
			0x08 => Self::Boolean,
			0x09 => Self::Datetime,
			0x0A => Self::Null,
			0x10 => Self::Int,
			0x11 => Self::Ulong,
			0x12 => Self::Long,
			_ => return None,
		})
	}

	/// Raw wire byte.
	pub fn as_byte(self) -> u8 {
		self as u8
	}

	/// Lowercase label used in diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			Self::Eoo => "eoo",
			Self::Float => "float",
			Self::String => "string",
			Self::Object => "object",
			Self::Array => "array",
			Self::Binary => "binary",
			Self::Boolean => "boolean",
			Self::Datetime => "datetime",
			Self::Null => "null",
			Self::Int => "int",
			Self::Ulong => "ulong",
			Self::Long => "long",
		}
	}

	/// Size of the value payload for fixed-width tags.
	pub fn fixed_width(self) -> Option<usize> {
		match self {
			Self::Null => Some(0),
			Self::Boolean => Some(1),
			Self::Int => Some(4),
			Self::Float | Self::Datetime | Self::Ulong | Self::Long => Some(8),
			Self::Eoo | Self::String | Self::Object | Self::Array | Self::Binary => None,
		}
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}(0x{:02x})", self.name(), self.as_byte())
	}
}
