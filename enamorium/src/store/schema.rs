use log::info;
use scylla::client::session::Session;

use crate::errors::EnamoriumError;

const TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id uuid PRIMARY KEY,
        name text,
        email text,
        password text,
        image text,
        created_at timestamp,
        updated_at timestamp
    )",
    "CREATE TABLE IF NOT EXISTS user_emails (
        email text PRIMARY KEY,
        user_id uuid
    )",
    "CREATE TABLE IF NOT EXISTS likes (
        source_user_id uuid,
        target_user_id uuid,
        created_at timestamp,
        PRIMARY KEY ((source_user_id), target_user_id)
    )",
];

/// Creates the keyspace and tables if missing and switches the session to the keyspace.
/// `keyspace` is interpolated into CQL, so it must already be validated.
pub async fn migrate(session: &Session, keyspace: &str, replication_factor: u8) -> Result<(), EnamoriumError> {
    let create_keyspace = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'NetworkTopologyStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session.query_unpaged(create_keyspace, ()).await?;
    use_keyspace(session, keyspace).await?;

    for table in TABLES {
        session.query_unpaged(table, ()).await?;
    }

    info!("Schema is up to date in keyspace {}", keyspace);

    Ok(())
}

pub async fn use_keyspace(session: &Session, keyspace: &str) -> Result<(), EnamoriumError> {
    session
        .use_keyspace(keyspace, false)
        .await
        .map_err(|e| EnamoriumError::InternalServerError(format!("Could not use keyspace {}: {}", keyspace, e)))
}
