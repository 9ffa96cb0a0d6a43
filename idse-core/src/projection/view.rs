//! I/O shell for C5: loads a [`ProjectSnapshot`] and writes the rendered
//! `blueprint.md` / `meta.md` files under the workspace. All rendering logic
//! lives in [`super::blueprint`] / [`super::meta`] and touches no I/O.

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use tokio::fs;

use crate::domain::ProjectId;
use crate::Result;

use super::{blueprint, meta, snapshot};

/// Loads the project's current state and writes `blueprint.md` and
/// `meta.md` under `<workspace_dir>/projects/<project_name>/`.
pub async fn export_views(pool: &SqlitePool, workspace_dir: &Path, project_id: ProjectId) -> Result<()> {
    let snapshot = snapshot::load(pool, project_id).await?;
    let blueprint_text = blueprint::render(&snapshot);
    let meta_text = meta::render(&snapshot);

    let project_dir = project_dir(workspace_dir, &snapshot.project.name);
    fs::create_dir_all(&project_dir).await?;
    fs::write(project_dir.join("blueprint.md"), blueprint_text).await?;
    fs::write(project_dir.join("meta.md"), meta_text).await?;

    Ok(())
}

fn project_dir(workspace_dir: &Path, project_name: &str) -> PathBuf {
    workspace_dir.join("projects").join(project_name)
}
