use anyhow::{Context as _, Result};
use idse_core::domain::{SessionStatus, SessionType};
use idse_core::repository::{project as project_repo, session as session_repo};
use idse_core::validation;

use crate::cli::{SessionAction, SessionStatusArg, SessionTypeArg};
use crate::context::Context;

pub async fn run(ctx: &Context, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::Create {
            project,
            session_id,
            session_type,
            owner,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;
            let session = session_repo::save_session(
                ctx.storage.pool(),
                project.id,
                &session_id,
                session_type_from_arg(session_type),
                owner.as_deref(),
            )
            .await?;
            println!("session '{}' ready ({})", session.session_id, session.status);
        }
        SessionAction::SetStatus {
            project,
            session_id,
            status,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;
            let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, &session_id)
                .await?
                .context("no such session")?;
            let new_status = session_status_from_arg(status);

            if matches!(new_status, SessionStatus::Complete) {
                match validation::set_status_checked(ctx.storage.pool(), &ctx.config, &session, new_status).await {
                    Ok(()) => println!("session '{session_id}' -> {status:?}"),
                    Err(idse_core::Error::CompletionBlocked(report)) => {
                        println!("completion blocked:\n{report}");
                    }
                    Err(err) => return Err(err.into()),
                }
            } else {
                session_repo::set_status(ctx.storage.pool(), session.id, new_status).await?;
                println!("session '{session_id}' -> {status:?}");
            }
        }
    }
    Ok(())
}

fn session_type_from_arg(arg: SessionTypeArg) -> SessionType {
    match arg {
        SessionTypeArg::Blueprint => SessionType::Blueprint,
        SessionTypeArg::Feature => SessionType::Feature,
    }
}

fn session_status_from_arg(arg: SessionStatusArg) -> SessionStatus {
    match arg {
        SessionStatusArg::Draft => SessionStatus::Draft,
        SessionStatusArg::InProgress => SessionStatus::InProgress,
        SessionStatusArg::Review => SessionStatus::Review,
        SessionStatusArg::Complete => SessionStatus::Complete,
        SessionStatusArg::Archived => SessionStatus::Archived,
        SessionStatusArg::Superseded => SessionStatus::Superseded,
    }
}
