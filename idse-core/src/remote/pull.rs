//! Pull algorithm (`spec.md` §4.6).

use std::sync::Arc;

use sqlx::SqlitePool;

use serde_json::Value;

use crate::domain::ArtifactRecord;
use crate::repository::{artifact as artifact_repo, dependency as dependency_repo, session as session_repo, sync_metadata as sync_metadata_repo};
use crate::{Error, Result};

use super::backend::RemoteBackend;
use super::batch::{run_batch, with_backoff, BatchSummary};

/// Pulls one artifact from the remote, upserting its body into the spine
/// and translating relation properties back to local artifact ids.
///
/// A missing remote row is recorded as `NotFound` and does not clear the
/// cached `remote_id` (`SPEC_FULL.md` §5 Open Question resolution: the more
/// conservative of the two behaviors the original allows).
pub async fn pull_artifact(
    pool: &SqlitePool,
    backend: &dyn RemoteBackend,
    backend_name: &str,
    project_name: &str,
    artifact: &ArtifactRecord,
) -> Result<()> {
    let metadata = sync_metadata_repo::get_sync_metadata(pool, artifact.id, backend_name)
        .await?
        .ok_or_else(|| Error::not_found("sync_metadata", artifact.id))?;
    let remote_id = metadata.remote_id.ok_or_else(|| Error::not_found("remote_id", artifact.id))?;

    let row = with_backoff(|| backend.fetch(&remote_id)).await?;

    let session = session_repo::load_session(pool, artifact.session_id).await?;
    artifact_repo::save_artifact(pool, &session, project_name, artifact.stage, &row.body).await?;

    sync_metadata_repo::save_sync_metadata(
        pool,
        artifact.id,
        backend_name,
        crate::domain::SyncMetadataPatch {
            pull_hash: Some(crate::hash::content_hash(&row.body)),
            ..Default::default()
        },
    )
    .await?;

    let mut upstream = Vec::new();
    if let Some(Value::Array(related)) = row.properties.get("UpstreamRelation").cloned() {
        for value in related {
            if let Some(related_remote_id) = value.as_str() {
                if let Some(local_id) =
                    sync_metadata_repo::find_artifact_by_remote_id(pool, backend_name, related_remote_id).await?
                {
                    upstream.push(local_id);
                }
            }
        }
    }
    dependency_repo::replace_dependencies(pool, artifact.id, &upstream).await?;

    tracing::info!(idse_id = %artifact.idse_id, remote_id = %remote_id, "pulled update");

    Ok(())
}

/// Pulls every artifact in `artifacts`, isolating per-artifact failures
/// (`spec.md` §4.6 Batch semantics). A remote row deleted out-of-band
/// surfaces here as a `NotFound` entry in [`BatchSummary::failed`].
pub async fn pull_batch(
    pool: SqlitePool,
    backend: Arc<dyn RemoteBackend>,
    backend_name: Arc<str>,
    project_name: Arc<str>,
    concurrency: usize,
    artifacts: Vec<ArtifactRecord>,
) -> BatchSummary {
    run_batch(artifacts, concurrency, move |artifact| {
        let pool = pool.clone();
        let backend = backend.clone();
        let backend_name = backend_name.clone();
        let project_name = project_name.clone();
        async move {
            let id = artifact.id;
            let result = pull_artifact(&pool, backend.as_ref(), &backend_name, &project_name, &artifact).await;
            (id, result)
        }
    })
    .await
}
