//! In-memory [`RemoteBackend`] used to exercise the push/pull algorithms
//! without a concrete production backend (`spec.md` §1 keeps transport
//! specifics external; §4.6 still needs something to drive against). Not
//! used outside tests, but kept public (rather than `#[cfg(test)]`) so
//! integration tests in `tests/` can build against it too.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

use super::backend::{QueryFilter, RemoteBackend, RemoteRow};

#[derive(Debug, Default)]
struct MockRow {
    parent_anchor: String,
    properties: HashMap<String, Value>,
    body: String,
}

/// In-memory remote row-store. Rows are keyed by a monotonically increasing
/// id string. `rate_limit_remaining` lets tests force `RateLimited` for a
/// fixed number of calls before allowing requests through, to exercise C6's
/// backoff path.
pub struct MockRemoteBackend {
    rows: Mutex<HashMap<String, MockRow>>,
    next_id: Mutex<u64>,
    rate_limit_remaining: Mutex<u32>,
}

impl MockRemoteBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
            rate_limit_remaining: Mutex::new(0),
        }
    }

    /// The next `count` calls to any operation return `RateLimited`.
    pub fn rate_limit_next(&self, count: u32) {
        *self.rate_limit_remaining.lock().unwrap_or_else(|e| e.into_inner()) = count;
    }

    /// Deletes a row out-of-band, simulating the "remote row deleted
    /// out-of-band" scenario (`spec.md` §9).
    pub fn delete_row(&self, row_id: &str) {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).remove(row_id);
    }

    fn consume_rate_limit(&self) -> Result<(), RemoteError> {
        let mut remaining = self.rate_limit_remaining.lock().unwrap_or_else(|e| e.into_inner());
        if *remaining > 0 {
            *remaining -= 1;
            return Err(RemoteError::RateLimited { retry_after_ms: 10 });
        }
        Ok(())
    }
}

impl Default for MockRemoteBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteBackend for MockRemoteBackend {
    async fn query(&self, view_anchor: &str, filter: &QueryFilter) -> Result<Vec<String>, RemoteError> {
        self.consume_rate_limit()?;
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let matches = rows
            .iter()
            .filter(|(_, row)| {
                row.parent_anchor == view_anchor
                    && filter.iter().all(|(k, v)| row.properties.get(k) == Some(v))
            })
            .map(|(id, _)| id.clone())
            .collect();
        Ok(matches)
    }

    async fn create(
        &self,
        parent_anchor: &str,
        properties: &HashMap<String, Value>,
        body: &str,
    ) -> Result<String, RemoteError> {
        self.consume_rate_limit()?;
        let mut next_id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        let id = next_id.to_string();
        *next_id += 1;

        self.rows.lock().unwrap_or_else(|e| e.into_inner()).insert(
            id.clone(),
            MockRow {
                parent_anchor: parent_anchor.to_string(),
                properties: properties.clone(),
                body: body.to_string(),
            },
        );
        Ok(id)
    }

    async fn update(
        &self,
        row_id: &str,
        properties: &HashMap<String, Value>,
        body: Option<&str>,
    ) -> Result<(), RemoteError> {
        self.consume_rate_limit()?;
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let row = rows.get_mut(row_id).ok_or(RemoteError::NotFound)?;
        for (k, v) in properties {
            row.properties.insert(k.clone(), v.clone());
        }
        if let Some(body) = body {
            row.body = body.to_string();
        }
        Ok(())
    }

    async fn fetch(&self, row_id: &str) -> Result<RemoteRow, RemoteError> {
        self.consume_rate_limit()?;
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let row = rows.get(row_id).ok_or(RemoteError::NotFound)?;
        Ok(RemoteRow {
            properties: row.properties.clone(),
            body: row.body.clone(),
        })
    }
}
