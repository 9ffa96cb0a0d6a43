use std::io::Read as _;

use anyhow::{Context as _, Result};
use idse_core::domain::Stage;
use idse_core::repository::{artifact as artifact_repo, project as project_repo, session as session_repo};

use crate::cli::{ArtifactAction, StageArg};
use crate::context::Context;

pub async fn run(ctx: &Context, action: ArtifactAction) -> Result<()> {
    match action {
        ArtifactAction::Save {
            project,
            session_id,
            stage,
            file,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;
            let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, &session_id)
                .await?
                .context("no such session")?;
            let content = read_content(file)?;
            let artifact = artifact_repo::save_artifact(
                ctx.storage.pool(),
                &session,
                &project.name,
                stage_from_arg(stage),
                &content,
            )
            .await?;
            println!("artifact '{}' saved (hash={})", artifact.idse_id, artifact.content_hash);
        }
        ArtifactAction::Show {
            project,
            session_id,
            stage,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;
            let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, &session_id)
                .await?
                .context("no such session")?;
            let artifact = artifact_repo::load_artifact(ctx.storage.pool(), session.id.get(), stage_from_arg(stage))
                .await?
                .context("no such artifact")?;
            println!("{}", serde_json::to_string_pretty(&artifact)?);
        }
    }
    Ok(())
}

fn read_content(file: Option<std::path::PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn stage_from_arg(arg: StageArg) -> Stage {
    match arg {
        StageArg::Intent => Stage::Intent,
        StageArg::Context => Stage::Context,
        StageArg::Spec => Stage::Spec,
        StageArg::Plan => Stage::Plan,
        StageArg::Tasks => Stage::Tasks,
        StageArg::Implementation => Stage::Implementation,
        StageArg::Feedback => Stage::Feedback,
        StageArg::Metadata => Stage::Metadata,
    }
}
