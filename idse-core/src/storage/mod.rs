//! StorageEngine (C1) — the embedded relational store.
//!
//! Owns durability, atomicity of write batches, and additive schema
//! evolution (`spec.md` §4.1). Every other component reads/writes through
//! [`StorageEngine::pool`] or [`StorageEngine::within_transaction`]; none of
//! them open their own connection.

mod migrations;
mod pool;

pub use migrations::ensure_schema;

use std::path::Path;

use futures::future::BoxFuture;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::Result;

/// The single per-workspace embedded database handle.
///
/// A single writer, many readers: `SqlitePool` already serializes writers
/// via WAL-mode SQLite locking, so no additional `Mutex` is layered on top
/// (`spec.md` §5 "single writer; concurrent readers are permitted").
#[derive(Clone)]
pub struct StorageEngine {
    pool: SqlitePool,
}

impl StorageEngine {
    /// Open (creating if absent) the database at `path`, then bring its
    /// schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `Error::StorageIo` if the file cannot be opened or the schema
    /// migrations fail.
    pub async fn open(path: &Path) -> Result<Self> {
        let pool = pool::create_connection_pool(path).await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Open an in-memory database, for tests. Schema is still applied.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = pool::create_in_memory_pool().await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every pooled connection, waiting for connections currently in
    /// use to finish first (`spec.md` §4.1 `close(handle)`).
    ///
    /// `StorageEngine` is also `Clone`; calling this on one handle closes the
    /// shared pool for every clone, since they all wrap the same
    /// `SqlitePool`.
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Run `body` under a single transaction. `body` either returns `Ok`
    /// (commit) or `Err` (rollback).
    ///
    /// SQLite has no true nested transactions; call sites that need to
    /// compose multiple writes atomically take `&mut Transaction` as a
    /// parameter instead of calling this again (`spec.md` §4.1 "Nested calls
    /// reuse the outermost transaction").
    ///
    /// # Errors
    ///
    /// Propagates whatever error `body` returns, or a storage error if the
    /// transaction itself cannot begin or commit.
    pub async fn within_transaction<F, T>(&self, body: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut Transaction<'_, Sqlite>) -> BoxFuture<'c, Result<T>>,
    {
        let mut tx = self.pool.begin().await?;
        match body(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                let _ = tx.rollback().await;
                Err(err)
            }
        }
    }
}
