//! Connection pool construction, grounded on the teacher's
//! `zjj/src/database/schema.rs::create_connection_pool`.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::Result;

pub(super) async fn create_connection_pool(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub(super) async fn create_in_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    // A single shared in-memory connection; SQLite's `:memory:` databases
    // are otherwise per-connection and invisible to each other, so the pool
    // is pinned to exactly one connection for the process lifetime.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}
