use std::fmt;
use std::str::FromStr;

use crate::bson::{Bson, BsonError, Reader, Result, Tag, Writer};

/// Serving role of a tablet. Encoded on the wire as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabletType {
	/// Not yet assigned to a role.
	#[default]
	Idle,
	/// Accepts writes for its shard.
	Master,
	/// Serving read-only replica.
	Replica,
	/// Batch/analytics read-only replica.
	Rdonly,
	/// Standby, not serving.
	Spare,
	/// Replica excluded from serving graphs.
	Experimental,
	/// Undergoing a schema change.
	SchemaUpgrade,
	/// Taking a backup.
	Backup,
	/// Restoring from a backup.
	Restore,
	/// Used by offline workers.
	Worker,
	/// Scheduled for removal.
	Scrap,
}

impl TabletType {
	/// All variants in declaration order.
	pub const ALL: [Self; 11] = [
		Self::Idle,
		Self::Master,
		Self::Replica,
		Self::Rdonly,
		Self::Spare,
		Self::Experimental,
		Self::SchemaUpgrade,
		Self::Backup,
		Self::Restore,
		Self::Worker,
		Self::Scrap,
	];

	/// Wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Master => "master",
			Self::Replica => "replica",
			Self::Rdonly => "rdonly",
			Self::Spare => "spare",
			Self::Experimental => "experimental",
			Self::SchemaUpgrade => "schema_upgrade",
			Self::Backup => "backup",
			Self::Restore => "restore",
			Self::Worker => "worker",
			Self::Scrap => "scrap",
		}
	}

	/// Return `true` for roles that serve query traffic.
	pub fn is_serving(self) -> bool {
		matches!(self, Self::Master | Self::Replica | Self::Rdonly)
	}
}

impl fmt::Display for TabletType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TabletType {
	type Err = BsonError;

	fn from_str(value: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|item| item.as_str() == value)
			.ok_or_else(|| BsonError::UnknownEnumValue {
				type_name: "TabletType",
				value: value.to_owned(),
			})
	}
}

impl Bson for TabletType {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::String, key);
		writer.put_string(self.as_str());
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::String => reader.read_str()?.parse(),
			Tag::Null => Ok(Self::default()),
			other => Err(BsonError::unexpected_tag("string", other)),
		}
	}
}
