use std::collections::BTreeMap;

use crate::bson::{Bson, BsonError, Reader, Result, Tag, Value, Writer};
use crate::bson_record;
use crate::vtgate::{Session, TabletType};

/// Opaque shard-routing key. Written as BINARY, accepted as BINARY or STRING.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct KeyspaceId(pub Vec<u8>);

impl KeyspaceId {
	/// Borrow the raw key bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl From<Vec<u8>> for KeyspaceId {
	fn from(value: Vec<u8>) -> Self {
		Self(value)
	}
}

impl From<&[u8]> for KeyspaceId {
	fn from(value: &[u8]) -> Self {
		Self(value.to_vec())
	}
}

impl Bson for KeyspaceId {
	fn encode_bson(&self, writer: &mut Writer, key: &str) {
		writer.put_prefix(Tag::Binary, key);
		writer.put_binary(&self.0);
	}

	fn decode_bson(reader: &mut Reader<'_>, tag: Tag) -> Result<Self> {
		match tag {
			Tag::Binary => Ok(Self(reader.read_binary()?.to_vec())),
			Tag::String => Ok(Self(reader.read_str()?.as_bytes().to_vec())),
			Tag::Null => Ok(Self::default()),
			other => Err(BsonError::unexpected_tag("binary", other)),
		}
	}
}

/// One external entity id bound to the keyspace id that routes it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityId {
	/// Application-level id, any generic value.
	pub external_id: Value,
	/// Routing key for the entity.
	pub keyspace_id: KeyspaceId,
}

impl Default for EntityId {
	fn default() -> Self {
		Self {
			external_id: Value::Null,
			keyspace_id: KeyspaceId::default(),
		}
	}
}

bson_record!(EntityId {
	"ExternalID" => external_id,
	"KeyspaceID" => keyspace_id,
});

/// Query routed to the shards owning a set of entity ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityIdsQuery {
	/// SQL text.
	pub sql: String,
	/// Bind variables. `None` is distinct from an empty map.
	pub bind_variables: Option<BTreeMap<String, Value>>,
	/// Target keyspace.
	pub keyspace: String,
	/// Column holding the entity ids.
	pub entity_column_name: String,
	/// Entity ids with their routing keys.
	pub entity_keyspace_ids: Vec<EntityId>,
	/// Tablet role to target.
	pub tablet_type: TabletType,
	/// Transaction session, if any.
	pub session: Option<Session>,
}

bson_record!(EntityIdsQuery {
	"Sql" => sql,
	"BindVariables" => bind_variables,
	"Keyspace" => keyspace,
	"EntityColumnName" => entity_column_name,
	"EntityKeyspaceIDs" => entity_keyspace_ids,
	"TabletType" => tablet_type,
	"Session" => session,
});

impl EntityIdsQuery {
	/// Group external ids by keyspace id, in key order.
	pub fn ids_by_keyspace_id(&self) -> BTreeMap<&KeyspaceId, Vec<&Value>> {
		let mut groups: BTreeMap<&KeyspaceId, Vec<&Value>> = BTreeMap::new();
		for entity in &self.entity_keyspace_ids {
			groups.entry(&entity.keyspace_id).or_default().push(&entity.external_id);
		}
		groups
	}
}
