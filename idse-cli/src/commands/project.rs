use anyhow::{Context as _, Result};
use idse_core::repository::project as project_repo;

use crate::cli::ProjectAction;
use crate::context::Context;

pub async fn run(ctx: &Context, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::Init { name, stack } => {
            let project = project_repo::save_project(ctx.storage.pool(), &name, &stack).await?;
            println!("project '{}' ready (id={})", project.name, project.id);
        }
        ProjectAction::Show { name } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &name)
                .await?
                .context("no such project")?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
    }
    Ok(())
}
