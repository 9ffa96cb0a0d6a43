//! RemoteProjector (C6) push/pull end-to-end scenarios (`spec.md` §4.6, §8,
//! §9 "remote row deleted out-of-band").

mod common;

use std::sync::Arc;

use idse_core::config::Config;
use idse_core::domain::Stage;
use idse_core::remote::{self, MockRemoteBackend, PushOutcome, RemoteBackend};
use idse_core::repository::{artifact as artifact_repo, sync_metadata as sync_metadata_repo};

#[tokio::test]
async fn push_creates_then_skips_on_an_unchanged_artifact() {
    let fx = common::bootstrap("orch", "s1").await;
    let artifact = artifact_repo::save_artifact(
        fx.storage.pool(),
        &fx.session,
        &fx.project.name,
        Stage::Spec,
        "the spec body",
    )
    .await
    .expect("save");

    let config = Config::default();
    let backend = MockRemoteBackend::new();

    let first = remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &artifact)
        .await
        .expect("first push");
    assert_eq!(first, PushOutcome::Created);

    let second = remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &artifact)
        .await
        .expect("second push of unchanged content");
    assert_eq!(second, PushOutcome::Skipped, "unchanged content_hash must skip the remote call");
}

#[tokio::test]
async fn push_updates_after_content_changes_and_preserves_a_human_edited_title() {
    let fx = common::bootstrap("orch", "s1").await;
    let artifact = artifact_repo::save_artifact(
        fx.storage.pool(),
        &fx.session,
        &fx.project.name,
        Stage::Spec,
        "v1",
    )
    .await
    .expect("save v1");

    let config = Config::default();
    let backend = MockRemoteBackend::new();
    remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &artifact)
        .await
        .expect("create");

    let metadata = sync_metadata_repo::get_sync_metadata(fx.storage.pool(), artifact.id, &config.sync_backend)
        .await
        .expect("load metadata")
        .expect("metadata exists after create");
    let remote_id = metadata.remote_id.clone().expect("remote_id cached after create");
    backend
        .update(&remote_id, &[("Title".to_string(), serde_json::json!("Edited by a human"))].into_iter().collect(), None)
        .await
        .expect("simulate a human edit on the remote");

    let artifact_v2 = artifact_repo::save_artifact(
        fx.storage.pool(),
        &fx.session,
        &fx.project.name,
        Stage::Spec,
        "v2",
    )
    .await
    .expect("save v2");

    let outcome = remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &artifact_v2)
        .await
        .expect("push v2");
    assert_eq!(outcome, PushOutcome::Updated);

    let row = backend.fetch(&remote_id).await.expect("fetch");
    assert_eq!(row.properties.get("Title"), Some(&serde_json::json!("Edited by a human")));
    assert_eq!(row.body, "v2");
}

#[tokio::test]
async fn pull_upserts_body_and_translates_upstream_relation_ids() {
    let fx = common::bootstrap("orch", "s1").await;
    let upstream = artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, Stage::Spec, "upstream spec")
        .await
        .expect("save upstream");
    let downstream = artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, Stage::Plan, "plan body")
        .await
        .expect("save downstream");

    let config = Config::default();
    let backend = MockRemoteBackend::new();
    remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &upstream)
        .await
        .expect("push upstream");
    remote::push_artifact(fx.storage.pool(), &backend, &config, &fx.project.name, &downstream)
        .await
        .expect("push downstream");

    let upstream_meta = sync_metadata_repo::get_sync_metadata(fx.storage.pool(), upstream.id, &config.sync_backend)
        .await
        .expect("load")
        .expect("exists");
    let downstream_meta = sync_metadata_repo::get_sync_metadata(fx.storage.pool(), downstream.id, &config.sync_backend)
        .await
        .expect("load")
        .expect("exists");

    // Simulate the remote side recording a relation back to `upstream`'s row,
    // then pull it into `downstream`.
    let mut props = std::collections::HashMap::new();
    props.insert(
        "UpstreamRelation".to_string(),
        serde_json::json!([upstream_meta.remote_id.clone().unwrap()]),
    );
    backend
        .update(&downstream_meta.remote_id.clone().unwrap(), &props, Some("edited on the remote"))
        .await
        .expect("simulate relation write");

    remote::pull_artifact(fx.storage.pool(), &backend, &config.sync_backend, &fx.project.name, &downstream)
        .await
        .expect("pull");

    let reloaded = artifact_repo::load_by_id(fx.storage.pool(), downstream.id).await.expect("reload");
    assert_eq!(reloaded.content, "edited on the remote");

    let deps = idse_core::repository::dependency::get_dependencies(
        fx.storage.pool(),
        downstream.id,
        idse_core::domain::DependencyDirection::Upstream,
    )
    .await
    .expect("deps");
    assert_eq!(deps, vec![upstream.id]);
}

#[tokio::test]
async fn a_remote_row_deleted_out_of_band_surfaces_as_a_failure_without_clearing_remote_id() {
    let fx = common::bootstrap("orch", "s1").await;
    let artifact = artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, Stage::Spec, "body")
        .await
        .expect("save");

    let config = Config::default();
    let backend = Arc::new(MockRemoteBackend::new());
    remote::push_artifact(fx.storage.pool(), backend.as_ref(), &config, &fx.project.name, &artifact)
        .await
        .expect("push");

    let metadata = sync_metadata_repo::get_sync_metadata(fx.storage.pool(), artifact.id, &config.sync_backend)
        .await
        .expect("load")
        .expect("exists");
    let remote_id = metadata.remote_id.clone().expect("cached");
    backend.delete_row(&remote_id);

    let summary = remote::pull_batch(
        fx.storage.pool().clone(),
        backend.clone() as Arc<dyn RemoteBackend>,
        Arc::from(config.sync_backend.as_str()),
        Arc::from(fx.project.name.as_str()),
        4,
        vec![artifact.clone()],
    )
    .await;

    assert!(summary.succeeded.is_empty());
    assert_eq!(summary.failed.len(), 1);

    let still_cached = sync_metadata_repo::get_sync_metadata(fx.storage.pool(), artifact.id, &config.sync_backend)
        .await
        .expect("load")
        .expect("exists");
    assert_eq!(still_cached.remote_id, Some(remote_id), "a missing remote row must not clear the cached id");
}
