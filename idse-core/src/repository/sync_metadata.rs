//! SyncMetadata aggregate (`spec.md` §4.2 `save_sync_metadata`,
//! `get_sync_metadata`).

use sqlx::{Row, SqlitePool};

use crate::domain::{ArtifactId, SyncMetadata, SyncMetadataPatch};
use crate::Result;

use super::parse_timestamp;

/// Partial upsert: fields left `None` on `patch` are preserved from the
/// existing row, per `spec.md` §4.2.
pub async fn save_sync_metadata(
    pool: &SqlitePool,
    artifact_id: ArtifactId,
    backend: &str,
    patch: SyncMetadataPatch,
) -> Result<SyncMetadata> {
    let existing = get_sync_metadata(pool, artifact_id, backend).await?;
    let pushed = patch.push_hash.is_some();
    let pulled = patch.pull_hash.is_some();

    let merged = SyncMetadata {
        artifact_id,
        backend: backend.to_string(),
        last_push_hash: patch.push_hash.or_else(|| existing.as_ref().and_then(|e| e.last_push_hash.clone())),
        last_push_at: if pushed {
            Some(super::now())
        } else {
            existing.as_ref().and_then(|e| e.last_push_at)
        },
        last_pull_hash: patch.pull_hash.or_else(|| existing.as_ref().and_then(|e| e.last_pull_hash.clone())),
        last_pull_at: if pulled {
            Some(super::now())
        } else {
            existing.as_ref().and_then(|e| e.last_pull_at)
        },
        remote_id: patch.remote_id.or_else(|| existing.as_ref().and_then(|e| e.remote_id.clone())),
    };

    sqlx::query(
        "INSERT INTO sync_metadata
            (artifact_id, backend, last_push_hash, last_push_at, last_pull_hash, last_pull_at, remote_id)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(artifact_id, backend) DO UPDATE SET
            last_push_hash = excluded.last_push_hash,
            last_push_at = excluded.last_push_at,
            last_pull_hash = excluded.last_pull_hash,
            last_pull_at = excluded.last_pull_at,
            remote_id = excluded.remote_id",
    )
    .bind(artifact_id.get())
    .bind(backend)
    .bind(&merged.last_push_hash)
    .bind(merged.last_push_at.map(|t| t.to_rfc3339()))
    .bind(&merged.last_pull_hash)
    .bind(merged.last_pull_at.map(|t| t.to_rfc3339()))
    .bind(&merged.remote_id)
    .execute(pool)
    .await?;

    Ok(merged)
}

pub async fn get_sync_metadata(
    pool: &SqlitePool,
    artifact_id: ArtifactId,
    backend: &str,
) -> Result<Option<SyncMetadata>> {
    let row = sqlx::query(
        "SELECT artifact_id, backend, last_push_hash, last_push_at, last_pull_hash, last_pull_at, remote_id
         FROM sync_metadata WHERE artifact_id = ? AND backend = ?",
    )
    .bind(artifact_id.get())
    .bind(backend)
    .fetch_optional(pool)
    .await?;

    row.map(parse_sync_metadata_row).transpose()
}

/// Reverse lookup used by the pull path to translate a remote relation id
/// back to a local artifact id (`spec.md` §4.6 step 3).
pub async fn find_artifact_by_remote_id(
    pool: &SqlitePool,
    backend: &str,
    remote_id: &str,
) -> Result<Option<ArtifactId>> {
    let row = sqlx::query(
        "SELECT artifact_id FROM sync_metadata WHERE backend = ? AND remote_id = ?",
    )
    .bind(backend)
    .bind(remote_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| ArtifactId(r.get("artifact_id"))))
}

fn parse_sync_metadata_row(row: sqlx::sqlite::SqliteRow) -> Result<SyncMetadata> {
    let last_push_at: Option<String> = row.get("last_push_at");
    let last_pull_at: Option<String> = row.get("last_pull_at");
    Ok(SyncMetadata {
        artifact_id: ArtifactId(row.get("artifact_id")),
        backend: row.get("backend"),
        last_push_hash: row.get("last_push_hash"),
        last_push_at: last_push_at.map(|t| parse_timestamp(&t)).transpose()?,
        last_pull_hash: row.get("last_pull_hash"),
        last_pull_at: last_pull_at.map(|t| parse_timestamp(&t)).transpose()?,
        remote_id: row.get("remote_id"),
    })
}
