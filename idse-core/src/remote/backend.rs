//! `RemoteBackend` — the transport seam C6 pushes/pulls through (`spec.md`
//! §4.6). No concrete production backend is in scope; transport specifics
//! are explicitly external (`spec.md` §1).

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

/// A filter passed to [`RemoteBackend::query`]. Kept as an opaque
/// property/value map rather than a query language, matching the
/// minimal `query(view_anchor, filter)` contract in `spec.md` §4.6.
pub type QueryFilter = HashMap<String, Value>;

/// The property map + body returned by [`RemoteBackend::fetch`] or sent to
/// [`RemoteBackend::create`]/[`RemoteBackend::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteRow {
    pub properties: HashMap<String, Value>,
    pub body: String,
}

/// Generic remote row-store seam. `spec.md` §4.6 names exactly these four
/// operations.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    async fn query(&self, view_anchor: &str, filter: &QueryFilter) -> Result<Vec<String>, RemoteError>;

    async fn create(
        &self,
        parent_anchor: &str,
        properties: &HashMap<String, Value>,
        body: &str,
    ) -> Result<String, RemoteError>;

    async fn update(
        &self,
        row_id: &str,
        properties: &HashMap<String, Value>,
        body: Option<&str>,
    ) -> Result<(), RemoteError>;

    async fn fetch(&self, row_id: &str) -> Result<RemoteRow, RemoteError>;
}
