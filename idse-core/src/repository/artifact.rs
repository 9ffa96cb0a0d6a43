//! Artifact aggregate (`spec.md` §4.2 `save_artifact`, `load_artifact`,
//! `find_by_idse_id`).

use sqlx::{Row, SqlitePool};

use super::{now, parse_timestamp};
use crate::domain::{ArtifactId, ArtifactRecord, Session, Stage};
use crate::hash;
use crate::{Error, Result};

/// Upsert by `(session_id, stage)`. Recomputes `content_hash`, `idse_id`,
/// `fingerprint`, `updated_at` on every call; `created_at` is set only on
/// first insert and never touched again.
pub async fn save_artifact(
    pool: &SqlitePool,
    session: &Session,
    project_name: &str,
    stage: Stage,
    content: &str,
) -> Result<ArtifactRecord> {
    let content_hash = hash::content_hash(content);
    let fingerprint = hash::fingerprint(content);
    let idse_id = hash::idse_id(project_name, &session.session_id, &stage.to_string());
    let updated_at = now();

    if let Some(existing) = load_artifact(pool, session.id.get(), stage).await? {
        sqlx::query(
            "UPDATE artifacts SET content = ?, content_hash = ?, fingerprint = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(content)
        .bind(&content_hash)
        .bind(&fingerprint)
        .bind(updated_at.to_rfc3339())
        .bind(existing.id.get())
        .execute(pool)
        .await?;

        tracing::debug!(idse_id = %existing.idse_id, stage = %stage, "updated artifact");

        return Ok(ArtifactRecord {
            content: content.to_string(),
            content_hash,
            fingerprint,
            updated_at,
            ..existing
        });
    }

    let created_at = updated_at;
    let id = sqlx::query(
        "INSERT INTO artifacts
            (session_id, stage, content, content_hash, idse_id, fingerprint, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(session.id.get())
    .bind(stage.to_string())
    .bind(content)
    .bind(&content_hash)
    .bind(&idse_id)
    .bind(&fingerprint)
    .bind(created_at.to_rfc3339())
    .bind(updated_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::conflict(format!("artifact {idse_id} already exists"))
        }
        other => Error::from(other),
    })?
    .last_insert_rowid();

    tracing::info!(idse_id = %idse_id, stage = %stage, "created artifact");

    Ok(ArtifactRecord {
        id: ArtifactId(id),
        session_id: session.id,
        stage,
        content: content.to_string(),
        content_hash,
        idse_id,
        fingerprint,
        created_at,
        updated_at,
    })
}

pub async fn load_artifact(
    pool: &SqlitePool,
    session_row_id: i64,
    stage: Stage,
) -> Result<Option<ArtifactRecord>> {
    let row = sqlx::query(
        "SELECT id, session_id, stage, content, content_hash, idse_id, fingerprint, created_at, updated_at
         FROM artifacts WHERE session_id = ? AND stage = ?",
    )
    .bind(session_row_id)
    .bind(stage.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(parse_artifact_row).transpose()
}

pub async fn find_by_idse_id(pool: &SqlitePool, idse_id: &str) -> Result<Option<ArtifactRecord>> {
    let row = sqlx::query(
        "SELECT id, session_id, stage, content, content_hash, idse_id, fingerprint, created_at, updated_at
         FROM artifacts WHERE idse_id = ?",
    )
    .bind(idse_id)
    .fetch_optional(pool)
    .await?;

    row.map(parse_artifact_row).transpose()
}

pub async fn load_by_id(pool: &SqlitePool, id: ArtifactId) -> Result<ArtifactRecord> {
    let row = sqlx::query(
        "SELECT id, session_id, stage, content, content_hash, idse_id, fingerprint, created_at, updated_at
         FROM artifacts WHERE id = ?",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("artifact", id))?;

    parse_artifact_row(row)
}

pub async fn list_by_session(pool: &SqlitePool, session_row_id: i64) -> Result<Vec<ArtifactRecord>> {
    let rows = sqlx::query(
        "SELECT id, session_id, stage, content, content_hash, idse_id, fingerprint, created_at, updated_at
         FROM artifacts WHERE session_id = ? ORDER BY id",
    )
    .bind(session_row_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_artifact_row).collect()
}

fn parse_artifact_row(row: sqlx::sqlite::SqliteRow) -> Result<ArtifactRecord> {
    let stage: String = row.get("stage");
    Ok(ArtifactRecord {
        id: ArtifactId(row.get("id")),
        session_id: crate::domain::SessionRowId(row.get("session_id")),
        stage: stage
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid stage '{stage}'")))?,
        content: row.get("content"),
        content_hash: row.get("content_hash"),
        idse_id: row.get("idse_id"),
        fingerprint: row.get("fingerprint"),
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
        updated_at: parse_timestamp(row.get::<String, _>("updated_at").as_str())?,
    })
}
