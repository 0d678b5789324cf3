mod query;
mod session;
mod tablet_type;

/// Entity-id routed query and its keyspace-id binding.
pub use query::{EntityId, EntityIdsQuery, KeyspaceId};
/// Transaction session state carried across routed calls.
pub use session::{Session, ShardSession};
/// Serving role of a tablet targeted by a query.
pub use tablet_type::TabletType;
