//! Schema migrations.
//!
//! `ensure_schema` applies an ordered list of `(version, sql)` steps, tracked
//! via `PRAGMA user_version` — the "recorded migration marker" `spec.md`
//! §4.1 requires for forward-only, idempotent schema evolution. Each step is
//! additive (new table or column); nothing here ever drops data.

use sqlx::{Row, SqlitePool};

use crate::Result;

type Migration = (i64, &'static str);

const MIGRATIONS: &[Migration] = &[(1, SCHEMA_V1)];

const SCHEMA_V1: &str = r"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    stack TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    session_id TEXT NOT NULL,
    session_type TEXT NOT NULL CHECK(session_type IN ('blueprint', 'feature')),
    status TEXT NOT NULL CHECK(status IN ('draft', 'in_progress', 'review', 'complete', 'archived', 'superseded')),
    owner TEXT,
    created_at TEXT NOT NULL,
    UNIQUE(project_id, session_id)
);

CREATE TABLE IF NOT EXISTS artifacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL REFERENCES sessions(id),
    stage TEXT NOT NULL CHECK(stage IN ('intent', 'context', 'spec', 'plan', 'tasks', 'implementation', 'feedback', 'metadata')),
    content TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    idse_id TEXT UNIQUE NOT NULL,
    fingerprint TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(session_id, stage)
);

CREATE INDEX IF NOT EXISTS idx_artifacts_idse_id ON artifacts(idse_id);

CREATE TABLE IF NOT EXISTS artifact_dependencies (
    artifact_id INTEGER NOT NULL REFERENCES artifacts(id),
    depends_on_artifact_id INTEGER NOT NULL REFERENCES artifacts(id),
    dependency_type TEXT NOT NULL CHECK(dependency_type IN ('upstream')),
    created_at TEXT NOT NULL,
    UNIQUE(artifact_id, depends_on_artifact_id)
);

CREATE TABLE IF NOT EXISTS sync_metadata (
    artifact_id INTEGER NOT NULL REFERENCES artifacts(id),
    backend TEXT NOT NULL,
    last_push_hash TEXT,
    last_push_at TEXT,
    last_pull_hash TEXT,
    last_pull_at TEXT,
    remote_id TEXT,
    UNIQUE(artifact_id, backend)
);

CREATE INDEX IF NOT EXISTS idx_sync_metadata_remote_id ON sync_metadata(remote_id);

CREATE TABLE IF NOT EXISTS session_tags (
    session_id INTEGER NOT NULL REFERENCES sessions(id),
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    UNIQUE(session_id, key)
);

CREATE TABLE IF NOT EXISTS session_state (
    session_id INTEGER PRIMARY KEY REFERENCES sessions(id),
    validation_status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS components (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    component_type TEXT NOT NULL CHECK(component_type IN ('projection', 'operation', 'infrastructure', 'routing', 'artifact')),
    source_file TEXT NOT NULL,
    parent_primitives TEXT NOT NULL,
    last_seen_in_session TEXT NOT NULL,
    last_updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS blueprint_claims (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    classification TEXT NOT NULL CHECK(classification IN ('invariant', 'boundary', 'ownership_rule', 'non_negotiable_constraint')),
    claim_text TEXT NOT NULL,
    origin TEXT NOT NULL CHECK(origin IN ('declared', 'converged')),
    status TEXT NOT NULL CHECK(status IN ('active', 'superseded', 'invalidated')),
    promotion_record_id INTEGER REFERENCES promotion_records(id),
    created_at TEXT NOT NULL,
    superseded_by INTEGER REFERENCES blueprint_claims(id)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_claims_active_text
    ON blueprint_claims(project_id, claim_text)
    WHERE status = 'active';

CREATE TABLE IF NOT EXISTS promotion_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    candidate_claim_text TEXT NOT NULL,
    classification TEXT NOT NULL,
    evidence_hash TEXT NOT NULL,
    source_sessions TEXT NOT NULL,
    source_stages TEXT NOT NULL,
    feedback_artifacts TEXT NOT NULL,
    decision TEXT NOT NULL CHECK(decision IN ('allow', 'deny')),
    reasons TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS claim_lifecycle_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    claim_id INTEGER NOT NULL REFERENCES blueprint_claims(id),
    old_status TEXT,
    new_status TEXT NOT NULL,
    reason TEXT NOT NULL,
    actor TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// Idempotent. Applies any migration step whose version exceeds the
/// database's current `PRAGMA user_version`, in order, each inside its own
/// transaction.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    let current_version: i64 = sqlx::query("PRAGMA user_version")
        .fetch_one(pool)
        .await?
        .get(0);

    for (version, sql) in MIGRATIONS {
        if *version <= current_version {
            continue;
        }
        let mut tx = pool.begin().await?;
        sqlx::query(sql).execute(&mut *tx).await?;
        tx.commit().await?;

        // PRAGMA statements cannot be parameterized; the version is a
        // compile-time constant from this module, not external input.
        sqlx::query(&format!("PRAGMA user_version = {version}"))
            .execute(pool)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = crate::storage::pool::create_in_memory_pool()
            .await
            .expect("pool");
        ensure_schema(&pool).await.expect("first apply");
        ensure_schema(&pool).await.expect("second apply is a no-op");

        let version: i64 = sqlx::query("PRAGMA user_version")
            .fetch_one(&pool)
            .await
            .expect("read version")
            .get(0);
        assert_eq!(version, 1);
    }
}
