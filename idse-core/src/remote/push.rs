//! Push algorithm (`spec.md` §4.6).

use std::collections::HashMap;

use serde_json::Value;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::domain::{ArtifactId, ArtifactRecord, DependencyDirection, Session, SessionTag, SyncMetadataPatch};
use crate::repository::{
    dependency as dependency_repo, session as session_repo, sync_metadata as sync_metadata_repo, tag as tag_repo,
};
use crate::Result;

use super::backend::RemoteBackend;
use super::batch::{run_batch, with_backoff, BatchSummary};
use super::schema_map::{PropertyContext, SchemaMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Skipped,
    Created,
    Updated,
}

/// Pushes a single artifact. Returns `Skipped` with zero remote calls when
/// the cached push hash already matches (`spec.md` §3 skip invariant).
pub async fn push_artifact(
    pool: &SqlitePool,
    backend: &dyn RemoteBackend,
    config: &Config,
    project_name: &str,
    artifact: &ArtifactRecord,
) -> Result<PushOutcome> {
    let backend_name = &config.sync_backend;
    let session = session_repo::load_session(pool, artifact.session_id).await?;
    let existing = sync_metadata_repo::get_sync_metadata(pool, artifact.id, backend_name).await?;

    if existing
        .as_ref()
        .is_some_and(|m| m.push_is_skippable(&artifact.content_hash))
    {
        tracing::debug!(idse_id = %artifact.idse_id, "push skipped, content unchanged");
        return Ok(PushOutcome::Skipped);
    }

    let schema_map = SchemaMap::new(&config.remote);
    let tags = load_tag_map(pool, &session).await?;
    let upstream_remote_ids = relation_remote_ids(pool, backend_name, artifact.id, DependencyDirection::Upstream).await?;
    let downstream_remote_ids =
        relation_remote_ids(pool, backend_name, artifact.id, DependencyDirection::Downstream).await?;
    let title = default_title(project_name, &session, artifact);

    let ctx = PropertyContext {
        artifact,
        session: &session,
        title,
        tags: &tags,
        upstream_remote_ids: &upstream_remote_ids,
        downstream_remote_ids: &downstream_remote_ids,
    };

    let anchor = config
        .remote
        .anchor
        .clone()
        .unwrap_or_else(|| project_name.to_string());

    match existing.as_ref().and_then(|m| m.remote_id.clone()) {
        Some(remote_id) => {
            let properties = schema_map.build_update_properties(&ctx);
            with_backoff(|| backend.update(&remote_id, &properties, Some(&artifact.content))).await?;
            sync_metadata_repo::save_sync_metadata(
                pool,
                artifact.id,
                backend_name,
                SyncMetadataPatch {
                    push_hash: Some(artifact.content_hash.clone()),
                    ..Default::default()
                },
            )
            .await?;
            tracing::info!(idse_id = %artifact.idse_id, remote_id = %remote_id, "pushed update");
            Ok(PushOutcome::Updated)
        }
        None => {
            let remote_id = resolve_remote_id_fallback(backend, &anchor, &ctx).await?;
            match remote_id {
                Some(remote_id) => {
                    let properties = schema_map.build_update_properties(&ctx);
                    with_backoff(|| backend.update(&remote_id, &properties, Some(&artifact.content))).await?;
                    sync_metadata_repo::save_sync_metadata(
                        pool,
                        artifact.id,
                        backend_name,
                        SyncMetadataPatch {
                            push_hash: Some(artifact.content_hash.clone()),
                            remote_id: Some(remote_id),
                            ..Default::default()
                        },
                    )
                    .await?;
                    tracing::info!(idse_id = %artifact.idse_id, remote_id = %remote_id, "resolved existing remote row, pushed update");
                    Ok(PushOutcome::Updated)
                }
                None => {
                    let properties = schema_map.build_create_properties(&ctx);
                    let remote_id =
                        with_backoff(|| backend.create(&anchor, &properties, &artifact.content)).await?;
                    sync_metadata_repo::save_sync_metadata(
                        pool,
                        artifact.id,
                        backend_name,
                        SyncMetadataPatch {
                            push_hash: Some(artifact.content_hash.clone()),
                            remote_id: Some(remote_id.clone()),
                            ..Default::default()
                        },
                    )
                    .await?;
                    tracing::info!(idse_id = %artifact.idse_id, remote_id = %remote_id, "pushed create");
                    Ok(PushOutcome::Created)
                }
            }
        }
    }
}

/// One `query` call by `(session, stage)` anchor, used only on first sync
/// before a `remote_id` has been cached (`spec.md` §4.6 step 3 fallback).
async fn resolve_remote_id_fallback(
    backend: &dyn RemoteBackend,
    anchor: &str,
    ctx: &PropertyContext<'_>,
) -> Result<Option<String>> {
    let mut filter = HashMap::new();
    filter.insert("Session".to_string(), Value::String(ctx.session.session_id.clone()));
    filter.insert("Stage".to_string(), Value::String(ctx.artifact.stage.to_string()));
    let matches = with_backoff(|| backend.query(anchor, &filter)).await?;
    Ok(matches.into_iter().next())
}

/// Pushes every artifact in `artifacts` with bounded concurrency
/// (`spec.md` §4.6 Batch semantics, §5).
pub async fn push_batch(
    pool: SqlitePool,
    backend: std::sync::Arc<dyn RemoteBackend>,
    config: std::sync::Arc<Config>,
    project_name: std::sync::Arc<str>,
    artifacts: Vec<ArtifactRecord>,
) -> BatchSummary {
    let concurrency = config.remote.concurrency;
    run_batch(artifacts, concurrency, move |artifact| {
        let pool = pool.clone();
        let backend = backend.clone();
        let config = config.clone();
        let project_name = project_name.clone();
        async move {
            let id = artifact.id;
            let result = push_artifact(&pool, backend.as_ref(), &config, &project_name, &artifact)
                .await
                .map(|_outcome| ());
            (id, result)
        }
    })
    .await
}

async fn load_tag_map(pool: &SqlitePool, session: &Session) -> Result<HashMap<String, String>> {
    let tags: Vec<SessionTag> = tag_repo::list_tags(pool, session.id).await?;
    Ok(tags.into_iter().map(|t| (t.key, t.value)).collect())
}

async fn relation_remote_ids(
    pool: &SqlitePool,
    backend_name: &str,
    artifact_id: ArtifactId,
    direction: DependencyDirection,
) -> Result<Vec<String>> {
    let related = dependency_repo::get_dependencies(pool, artifact_id, direction).await?;
    let mut ids = Vec::with_capacity(related.len());
    for related_id in related {
        if let Some(meta) = sync_metadata_repo::get_sync_metadata(pool, related_id, backend_name).await? {
            if let Some(remote_id) = meta.remote_id {
                ids.push(remote_id);
            }
        }
    }
    Ok(ids)
}

fn default_title(project_name: &str, session: &Session, artifact: &ArtifactRecord) -> String {
    format!("{} – {project_name} – {}", artifact.stage, session.session_id)
}
