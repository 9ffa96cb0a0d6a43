//! SessionState aggregate (`spec.md` §3, §4.4). Stores the `ValidationEngine`
//! report as JSON; the authoritative copy lives in the DB, regenerated views
//! are derived from it.

use sqlx::{Row, SqlitePool};

use crate::domain::{SessionRowId, SessionState, ValidationStatus};
use crate::Result;

pub async fn save_validation_status(
    pool: &SqlitePool,
    session_id: SessionRowId,
    status: &ValidationStatus,
) -> Result<()> {
    let json = serde_json::to_string(status)?;
    sqlx::query(
        "INSERT INTO session_state (session_id, validation_status) VALUES (?, ?)
         ON CONFLICT(session_id) DO UPDATE SET validation_status = excluded.validation_status",
    )
    .bind(session_id.get())
    .bind(json)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn load_session_state(
    pool: &SqlitePool,
    session_id: SessionRowId,
) -> Result<Option<SessionState>> {
    let row = sqlx::query("SELECT session_id, validation_status FROM session_state WHERE session_id = ?")
        .bind(session_id.get())
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else { return Ok(None) };
    let raw: String = row.get("validation_status");
    let validation_status: ValidationStatus = serde_json::from_str(&raw)?;
    Ok(Some(SessionState {
        session_id: SessionRowId(row.get("session_id")),
        validation_status,
    }))
}
