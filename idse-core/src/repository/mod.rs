//! ArtifactRepository (C2) — the only component that reads/writes spine
//! tables directly (`spec.md` §4.2).
//!
//! One module per aggregate, each exposing free functions over `&SqlitePool`,
//! following the teacher's `query.rs` (row parsing) / `session_ops.rs` (CRUD
//! orchestration) split.

pub mod artifact;
pub mod claim;
pub mod component;
pub mod dependency;
pub mod project;
pub mod session;
pub mod session_state;
pub mod sync_metadata;
pub mod tag;

use chrono::{DateTime, Utc};

/// Parses an RFC 3339 timestamp column. Every timestamp column in the schema
/// is written by [`now`] and is therefore always well-formed; a parse
/// failure indicates on-disk corruption.
pub(crate) fn parse_timestamp(raw: &str) -> crate::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| crate::Error::Corruption(format!("invalid timestamp '{raw}': {e}")))
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
