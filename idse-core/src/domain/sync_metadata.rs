//! SyncMetadata — per-artifact, per-backend sync bookkeeping (`spec.md` §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ArtifactId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    pub artifact_id: ArtifactId,
    pub backend: String,
    pub last_push_hash: Option<String>,
    pub last_push_at: Option<DateTime<Utc>>,
    pub last_pull_hash: Option<String>,
    pub last_pull_at: Option<DateTime<Utc>>,
    pub remote_id: Option<String>,
}

impl SyncMetadata {
    /// `spec.md` §3: "a push is skippable iff `last_push_hash == content_hash
    /// AND remote_id IS NOT NULL`".
    #[must_use]
    pub fn push_is_skippable(&self, content_hash: &str) -> bool {
        self.remote_id.is_some()
            && self.last_push_hash.as_deref() == Some(content_hash)
    }
}

/// Partial update to a [`SyncMetadata`] row. Fields left `None` are
/// preserved, per the `save_sync_metadata` "partial upsert" contract in
/// `spec.md` §4.2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncMetadataPatch {
    pub push_hash: Option<String>,
    pub pull_hash: Option<String>,
    pub remote_id: Option<String>,
}
