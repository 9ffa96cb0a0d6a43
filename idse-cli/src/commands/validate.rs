use anyhow::{Context as _, Result};
use idse_core::domain::SessionStatus;
use idse_core::repository::{project as project_repo, session as session_repo};
use idse_core::validation;

use crate::context::Context;

pub async fn run(ctx: &Context, project: &str, session_id: &str, complete: bool) -> Result<()> {
    let project = project_repo::find_by_name(ctx.storage.pool(), project)
        .await?
        .context("no such project")?;
    let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, session_id)
        .await?
        .context("no such session")?;

    if complete {
        match validation::set_status_checked(ctx.storage.pool(), &ctx.config, &session, SessionStatus::Complete).await {
            Ok(()) => println!("session '{session_id}' marked complete"),
            Err(idse_core::Error::CompletionBlocked(report)) => {
                println!("completion blocked:\n{report}");
            }
            Err(err) => return Err(err.into()),
        }
        return Ok(());
    }

    let report = validation::validate_session(ctx.storage.pool(), &ctx.config, &session).await?;
    print!("{report}");
    Ok(())
}
