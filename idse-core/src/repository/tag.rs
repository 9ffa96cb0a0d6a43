//! SessionTag aggregate (`spec.md` §3). An unordered key/value bag; upserts
//! by `(session_id, key)`.

use sqlx::{Row, SqlitePool};

use crate::domain::{SessionRowId, SessionTag};
use crate::Result;

pub async fn set_tag(pool: &SqlitePool, session_id: SessionRowId, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO session_tags (session_id, key, value) VALUES (?, ?, ?)
         ON CONFLICT(session_id, key) DO UPDATE SET value = excluded.value",
    )
    .bind(session_id.get())
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_tags(pool: &SqlitePool, session_id: SessionRowId) -> Result<Vec<SessionTag>> {
    let rows = sqlx::query("SELECT session_id, key, value FROM session_tags WHERE session_id = ?")
        .bind(session_id.get())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| SessionTag {
            session_id: SessionRowId(row.get("session_id")),
            key: row.get("key"),
            value: row.get("value"),
        })
        .collect())
}
