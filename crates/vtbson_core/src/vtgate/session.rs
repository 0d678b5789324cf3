use crate::bson_record;
use crate::vtgate::TabletType;

/// Transaction state threaded through successive routed calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
	/// Whether a transaction is open.
	pub in_transaction: bool,
	/// Per-shard transaction handles.
	pub shard_sessions: Vec<ShardSession>,
}

bson_record!(Session {
	"InTransaction" => in_transaction,
	"ShardSessions" => shard_sessions,
});

/// Open transaction on one shard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShardSession {
	/// Keyspace of the shard.
	pub keyspace: String,
	/// Shard name, e.g. `-80`.
	pub shard: String,
	/// Tablet role holding the transaction.
	pub tablet_type: TabletType,
	/// Transaction id on that tablet.
	pub transaction_id: i64,
}

bson_record!(ShardSession {
	"Keyspace" => keyspace,
	"Shard" => shard,
	"TabletType" => tablet_type,
	"TransactionId" => transaction_id,
});

impl Session {
	/// Find the shard session for `keyspace`/`shard`.
	pub fn find(&self, keyspace: &str, shard: &str) -> Option<&ShardSession> {
		self.shard_sessions.iter().find(|item| item.keyspace == keyspace && item.shard == shard)
	}
}
