//! No concrete production remote backend is in scope (transport specifics
//! are external); this wraps C6 against the in-memory mock so the push/pull
//! algorithms are reachable from the CLI for demonstration and testing.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use idse_core::remote::{self, MockRemoteBackend, RemoteBackend};
use idse_core::repository::{artifact as artifact_repo, project as project_repo, session as session_repo};

use crate::context::Context;

pub async fn push(ctx: &Context, project: &str, session_id: &str) -> Result<()> {
    let project = project_repo::find_by_name(ctx.storage.pool(), project)
        .await?
        .context("no such project")?;
    let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, session_id)
        .await?
        .context("no such session")?;
    let artifacts = artifact_repo::list_by_session(ctx.storage.pool(), session.id.get()).await?;

    let backend: Arc<dyn RemoteBackend> = Arc::new(MockRemoteBackend::new());
    let summary = remote::push_batch(
        ctx.storage.pool().clone(),
        backend,
        Arc::new(ctx.config.clone()),
        Arc::from(project.name.as_str()),
        artifacts,
    )
    .await;

    println!("pushed: {} succeeded, {} failed", summary.succeeded.len(), summary.failed.len());
    for (id, err) in &summary.failed {
        println!("  {id}: {err}");
    }
    Ok(())
}

pub async fn pull(ctx: &Context, project: &str, session_id: &str) -> Result<()> {
    let project = project_repo::find_by_name(ctx.storage.pool(), project)
        .await?
        .context("no such project")?;
    let session = session_repo::find_by_natural_key(ctx.storage.pool(), project.id, session_id)
        .await?
        .context("no such session")?;
    let artifacts = artifact_repo::list_by_session(ctx.storage.pool(), session.id.get()).await?;

    let backend: Arc<dyn RemoteBackend> = Arc::new(MockRemoteBackend::new());
    let summary = remote::pull_batch(
        ctx.storage.pool().clone(),
        backend,
        Arc::from(ctx.config.sync_backend.as_str()),
        Arc::from(project.name.as_str()),
        ctx.config.remote.concurrency,
        artifacts,
    )
    .await;

    println!("pulled: {} succeeded, {} failed", summary.succeeded.len(), summary.failed.len());
    for (id, err) in &summary.failed {
        println!("  {id}: {err}");
    }
    Ok(())
}
