use anyhow::{Context as _, Result};
use idse_core::projection;
use idse_core::repository::project as project_repo;

use crate::context::Context;

pub async fn run(ctx: &Context, project: &str) -> Result<()> {
    let project = project_repo::find_by_name(ctx.storage.pool(), project)
        .await?
        .context("no such project")?;
    projection::export_views(ctx.storage.pool(), &ctx.workspace_dir, project.id).await?;
    println!(
        "wrote {}/projects/{}/{{blueprint,meta}}.md",
        ctx.workspace_dir.display(),
        project.name
    );
    Ok(())
}
