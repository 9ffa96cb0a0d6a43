//! Component aggregate (`spec.md` §3, §4.2 `save_component`).

use sqlx::{Row, SqlitePool};

use super::{now, parse_timestamp};
use crate::domain::{Component, ComponentId, ComponentType};
use crate::{Error, Result};

/// Upsert by `name`. Rejects an empty `parent_primitives` list, per
/// `spec.md` §4.2.
pub async fn save_component(pool: &SqlitePool, candidate: Component) -> Result<Component> {
    if candidate.parent_primitives.is_empty() {
        return Err(Error::invariant(
            "component must declare at least one parent primitive",
        ));
    }

    let parent_primitives = serde_json::to_string(&candidate.parent_primitives)?;
    let last_updated_at = now();

    let id = sqlx::query(
        "INSERT INTO components
            (name, component_type, source_file, parent_primitives, last_seen_in_session, last_updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(name) DO UPDATE SET
            component_type = excluded.component_type,
            source_file = excluded.source_file,
            parent_primitives = excluded.parent_primitives,
            last_seen_in_session = excluded.last_seen_in_session,
            last_updated_at = excluded.last_updated_at
         RETURNING id",
    )
    .bind(&candidate.name)
    .bind(candidate.component_type.to_string())
    .bind(&candidate.source_file)
    .bind(&parent_primitives)
    .bind(&candidate.last_seen_in_session)
    .bind(last_updated_at.to_rfc3339())
    .fetch_one(pool)
    .await?
    .get::<i64, _>("id");

    Ok(Component {
        id: ComponentId(id),
        last_updated_at,
        ..candidate
    })
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Component>> {
    let row = sqlx::query(
        "SELECT id, name, component_type, source_file, parent_primitives, last_seen_in_session, last_updated_at
         FROM components WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.map(parse_component_row).transpose()
}

fn parse_component_row(row: sqlx::sqlite::SqliteRow) -> Result<Component> {
    let component_type: String = row.get("component_type");
    let parent_primitives: String = row.get("parent_primitives");
    Ok(Component {
        id: ComponentId(row.get("id")),
        name: row.get("name"),
        component_type: component_type
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid component_type '{component_type}'")))?,
        source_file: row.get("source_file"),
        parent_primitives: serde_json::from_str(&parent_primitives)?,
        last_seen_in_session: row.get("last_seen_in_session"),
        last_updated_at: parse_timestamp(row.get::<String, _>("last_updated_at").as_str())?,
    })
}
