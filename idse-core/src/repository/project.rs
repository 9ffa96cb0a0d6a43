//! Project aggregate (`spec.md` §4.2 `save_project`).

use sqlx::{Row, SqlitePool};

use super::{now, parse_timestamp};
use crate::domain::{Project, ProjectId};
use crate::{Error, Result};

/// Idempotent on `name`: if a project with this name already exists, its
/// row is returned unchanged rather than erroring.
pub async fn save_project(pool: &SqlitePool, name: &str, stack: &str) -> Result<Project> {
    if let Some(existing) = find_by_name(pool, name).await? {
        return Ok(existing);
    }

    let created_at = now();
    let id = sqlx::query("INSERT INTO projects (name, stack, created_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(stack)
        .bind(created_at.to_rfc3339())
        .execute(pool)
        .await?
        .last_insert_rowid();

    tracing::info!(project = name, stack, "created project");

    Ok(Project {
        id: ProjectId(id),
        name: name.to_string(),
        stack: stack.to_string(),
        created_at,
    })
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Project>> {
    let row = sqlx::query("SELECT id, name, stack, created_at FROM projects WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.map(parse_project_row).transpose()
}

pub async fn load_project(pool: &SqlitePool, id: ProjectId) -> Result<Project> {
    let row = sqlx::query("SELECT id, name, stack, created_at FROM projects WHERE id = ?")
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::not_found("project", id))?;

    parse_project_row(row)
}

fn parse_project_row(row: sqlx::sqlite::SqliteRow) -> Result<Project> {
    Ok(Project {
        id: ProjectId(row.get("id")),
        name: row.get("name"),
        stack: row.get("stack"),
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
    })
}
