use std::path::PathBuf;

use vtbson::bson::decode_document_with;
use vtbson::vtgate::{EntityIdsQuery, Session};

use crate::cmd::dump::decode_options;
use crate::cmd::json::{document_to_json, value_to_json};
use crate::cmd::util::{emit_json, read_input};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub strict: bool,
}

/// Decode an `EntityIdsQuery` payload and print its fields.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, strict } = args;

	let bytes = read_input(&path)?;
	let query: EntityIdsQuery = decode_document_with(&bytes, decode_options(strict, None))?;

	if json {
		return emit_json(&QueryJson::from_query(&query));
	}

	println!("sql: {}", query.sql);
	println!("keyspace: {}", query.keyspace);
	println!("entity_column_name: {}", query.entity_column_name);
	println!("tablet_type: {}", query.tablet_type);
	match &query.bind_variables {
		Some(binds) => {
			println!("bind_variables: {}", binds.len());
			for (name, value) in binds {
				println!("  {name}: {}", value_to_json(value));
			}
		}
		None => println!("bind_variables: -"),
	}

	println!("entity_keyspace_ids: {}", query.entity_keyspace_ids.len());
	for (keyspace_id, ids) in query.ids_by_keyspace_id() {
		let ids: Vec<String> = ids.into_iter().map(|id| value_to_json(id).to_string()).collect();
		println!("  {}: {}", hex::encode(keyspace_id.as_bytes()), ids.join(", "));
	}

	match &query.session {
		Some(session) => print_session(session),
		None => println!("session: -"),
	}
	Ok(())
}

fn print_session(session: &Session) {
	println!("session: in_transaction={}", session.in_transaction);
	for shard in &session.shard_sessions {
		println!("  {}/{} {} tx={}", shard.keyspace, shard.shard, shard.tablet_type, shard.transaction_id);
	}
}

#[derive(serde::Serialize)]
struct QueryJson {
	sql: String,
	keyspace: String,
	entity_column_name: String,
	tablet_type: String,
	bind_variables: Option<serde_json::Value>,
	entity_keyspace_ids: Vec<EntityIdJson>,
	session: Option<SessionJson>,
}

#[derive(serde::Serialize)]
struct EntityIdJson {
	external_id: serde_json::Value,
	keyspace_id: String,
}

#[derive(serde::Serialize)]
struct SessionJson {
	in_transaction: bool,
	shard_sessions: Vec<ShardSessionJson>,
}

#[derive(serde::Serialize)]
struct ShardSessionJson {
	keyspace: String,
	shard: String,
	tablet_type: String,
	transaction_id: i64,
}

impl QueryJson {
	fn from_query(query: &EntityIdsQuery) -> Self {
		Self {
			sql: query.sql.clone(),
			keyspace: query.keyspace.clone(),
			entity_column_name: query.entity_column_name.clone(),
			tablet_type: query.tablet_type.to_string(),
			bind_variables: query.bind_variables.as_ref().map(document_to_json),
			entity_keyspace_ids: query
				.entity_keyspace_ids
				.iter()
				.map(|entity| EntityIdJson {
					external_id: value_to_json(&entity.external_id),
					keyspace_id: hex::encode(entity.keyspace_id.as_bytes()),
				})
				.collect(),
			session: query.session.as_ref().map(|session| SessionJson {
				in_transaction: session.in_transaction,
				shard_sessions: session
					.shard_sessions
					.iter()
					.map(|shard| ShardSessionJson {
						keyspace: shard.keyspace.clone(),
						shard: shard.shard.clone(),
						tablet_type: shard.tablet_type.to_string(),
						transaction_id: shard.transaction_id,
					})
					.collect(),
			}),
		}
	}
}
