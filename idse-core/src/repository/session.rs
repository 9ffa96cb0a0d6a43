//! Session aggregate (`spec.md` §4.2 `save_session`).

use sqlx::{Row, SqlitePool};

use super::{now, parse_timestamp};
use crate::domain::{ProjectId, Session, SessionRowId, SessionStatus, SessionType, BLUEPRINT_SESSION_ID};
use crate::{Error, Result};

/// Idempotent on `(project_id, session_id)`.
///
/// Enforces `spec.md` §3: `session_id = "__blueprint__"` iff
/// `session_type = Blueprint`.
pub async fn save_session(
    pool: &SqlitePool,
    project_id: ProjectId,
    session_id: &str,
    session_type: SessionType,
    owner: Option<&str>,
) -> Result<Session> {
    let is_blueprint_id = session_id == BLUEPRINT_SESSION_ID;
    let is_blueprint_type = matches!(session_type, SessionType::Blueprint);
    if is_blueprint_id != is_blueprint_type {
        return Err(Error::invariant(
            "session_id \"__blueprint__\" must pair with session_type = blueprint and vice versa",
        ));
    }

    if let Some(existing) = find_by_natural_key(pool, project_id, session_id).await? {
        return Ok(existing);
    }

    let created_at = now();
    let id = sqlx::query(
        "INSERT INTO sessions (project_id, session_id, session_type, status, owner, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(project_id.get())
    .bind(session_id)
    .bind(session_type.to_string())
    .bind(SessionStatus::Draft.to_string())
    .bind(owner)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::info!(project_id = project_id.get(), session_id, session_type = %session_type, "created session");

    Ok(Session {
        id: SessionRowId(id),
        project_id,
        session_id: session_id.to_string(),
        session_type,
        status: SessionStatus::Draft,
        owner: owner.map(str::to_string),
        created_at,
    })
}

pub async fn find_by_natural_key(
    pool: &SqlitePool,
    project_id: ProjectId,
    session_id: &str,
) -> Result<Option<Session>> {
    let row = sqlx::query(
        "SELECT id, project_id, session_id, session_type, status, owner, created_at
         FROM sessions WHERE project_id = ? AND session_id = ?",
    )
    .bind(project_id.get())
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    row.map(parse_session_row).transpose()
}

pub async fn load_session(pool: &SqlitePool, id: SessionRowId) -> Result<Session> {
    let row = sqlx::query(
        "SELECT id, project_id, session_id, session_type, status, owner, created_at
         FROM sessions WHERE id = ?",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("session", id))?;

    parse_session_row(row)
}

/// Sets `status`. Used by completion transitions and the archive/supersede
/// lifecycle referenced in `spec.md` §3 "never destroyed, only archived".
pub async fn set_status(pool: &SqlitePool, id: SessionRowId, status: SessionStatus) -> Result<()> {
    let affected = sqlx::query("UPDATE sessions SET status = ? WHERE id = ?")
        .bind(status.to_string())
        .bind(id.get())
        .execute(pool)
        .await?
        .rows_affected();

    if affected == 0 {
        return Err(Error::not_found("session", id));
    }
    tracing::info!(session_id = id.get(), status = %status, "transitioned session status");
    Ok(())
}

pub async fn list_by_project(pool: &SqlitePool, project_id: ProjectId) -> Result<Vec<Session>> {
    let rows = sqlx::query(
        "SELECT id, project_id, session_id, session_type, status, owner, created_at
         FROM sessions WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_session_row).collect()
}

fn parse_session_row(row: sqlx::sqlite::SqliteRow) -> Result<Session> {
    let session_type: String = row.get("session_type");
    let status: String = row.get("status");
    Ok(Session {
        id: SessionRowId(row.get("id")),
        project_id: ProjectId(row.get("project_id")),
        session_id: row.get("session_id"),
        session_type: session_type
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid session_type '{session_type}'")))?,
        status: status
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid session status '{status}'")))?,
        owner: row.get("owner"),
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
    })
}
