//! ArtifactDependency aggregate (`spec.md` §4.2 `save_dependency`,
//! `get_dependencies`; §9 cycle handling).

use sqlx::{Row, SqlitePool};

use super::now;
use crate::domain::{ArtifactId, DependencyDirection, DependencyType};
use crate::{Error, Result};

/// Idempotent; rejects self-edges. Wider cycles are permitted structurally
/// per `spec.md` §9 — only a dependency on oneself is rejected here.
pub async fn save_dependency(
    pool: &SqlitePool,
    artifact_id: ArtifactId,
    depends_on_id: ArtifactId,
) -> Result<()> {
    if artifact_id == depends_on_id {
        return Err(Error::invariant("an artifact cannot depend on itself"));
    }

    sqlx::query(
        "INSERT OR IGNORE INTO artifact_dependencies
            (artifact_id, depends_on_artifact_id, dependency_type, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(artifact_id.get())
    .bind(depends_on_id.get())
    .bind(DependencyType::Upstream.to_string())
    .bind(now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Replaces the full set of dependencies for `artifact_id` with `new_deps`
/// (delete-then-insert), used by the remote pull path (`spec.md` §4.6 step
/// 3) to keep relation state deterministic.
pub async fn replace_dependencies(
    pool: &SqlitePool,
    artifact_id: ArtifactId,
    new_deps: &[ArtifactId],
) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM artifact_dependencies WHERE artifact_id = ?")
        .bind(artifact_id.get())
        .execute(&mut *tx)
        .await?;

    for dep in new_deps {
        if *dep == artifact_id {
            continue;
        }
        sqlx::query(
            "INSERT OR IGNORE INTO artifact_dependencies
                (artifact_id, depends_on_artifact_id, dependency_type, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(artifact_id.get())
        .bind(dep.get())
        .bind(DependencyType::Upstream.to_string())
        .bind(now().to_rfc3339())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn get_dependencies(
    pool: &SqlitePool,
    artifact_id: ArtifactId,
    direction: DependencyDirection,
) -> Result<Vec<ArtifactId>> {
    let rows = match direction {
        DependencyDirection::Upstream => {
            sqlx::query(
                "SELECT depends_on_artifact_id AS id FROM artifact_dependencies WHERE artifact_id = ?",
            )
            .bind(artifact_id.get())
            .fetch_all(pool)
            .await?
        }
        DependencyDirection::Downstream => {
            sqlx::query(
                "SELECT artifact_id AS id FROM artifact_dependencies WHERE depends_on_artifact_id = ?",
            )
            .bind(artifact_id.get())
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(|row| ArtifactId(row.get("id"))).collect())
}
