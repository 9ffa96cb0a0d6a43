//! Content-addressing and claim-pairing invariants (`spec.md` §3, §8).

mod common;

use idse_core::domain::{BLUEPRINT_SESSION_ID, Classification, Origin, SessionType};
use idse_core::repository::{artifact as artifact_repo, project as project_repo, session as session_repo};
use idse_core::{claims, hash};

#[tokio::test]
async fn identical_content_yields_identical_hash_and_idse_id() {
    let fx = common::bootstrap("orch", "s1").await;

    let a = artifact_repo::save_artifact(
        fx.storage.pool(),
        &fx.session,
        &fx.project.name,
        idse_core::domain::Stage::Intent,
        "Goal: ship\nSuccess Criteria: it ships",
    )
    .await
    .expect("save intent");

    assert_eq!(a.content_hash, hash::content_hash("Goal: ship\nSuccess Criteria: it ships"));
    assert_eq!(a.idse_id, "orch::s1::intent");
}

#[tokio::test]
async fn saving_a_second_stage_twice_is_an_upsert_not_a_duplicate() {
    let fx = common::bootstrap("orch", "s1").await;
    let stage = idse_core::domain::Stage::Intent;

    let first = artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, stage, "v1")
        .await
        .expect("first save");
    let second = artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, stage, "v2")
        .await
        .expect("second save");

    assert_eq!(first.id, second.id);
    assert_eq!(second.content, "v2");
    assert_eq!(second.created_at, first.created_at);
    assert_ne!(second.content_hash, first.content_hash);

    let all = artifact_repo::list_by_session(fx.storage.pool(), fx.session.id.get())
        .await
        .expect("list");
    assert_eq!(all.len(), 1, "upsert must not leave a duplicate row behind");
}

#[tokio::test]
async fn declared_claim_has_no_promotion_record_and_converged_claim_always_does() {
    let fx = common::bootstrap("orch", BLUEPRINT_SESSION_ID).await;

    let declared = claims::declare_claim(
        &fx.storage,
        fx.project.id,
        "The spine never mutates history.",
        Classification::Invariant,
        BLUEPRINT_SESSION_ID,
        "founder",
    )
    .await
    .expect("declare");

    assert_eq!(declared.origin, Origin::Declared);
    assert!(declared.promotion_record_id.is_none());
    assert!(declared.origin_is_consistent());

    // Build evidence diverse enough across two sessions, two stages, and old
    // enough to clear the default 7-day temporal stability window.
    let s2 = session_repo::save_session(
        fx.storage.pool(),
        fx.project.id,
        "s2",
        SessionType::Feature,
        None,
    )
    .await
    .expect("save s2");

    let evidence = vec![
        claims::EvidenceArtifact {
            idse_id: "orch::s1::spec".to_string(),
            session_id: "s1".to_string(),
            stage: idse_core::domain::Stage::Spec,
            created_at: chrono::Utc::now() - chrono::Duration::days(10),
            has_contradiction_signal: false,
        },
        claims::EvidenceArtifact {
            idse_id: "orch::s2::feedback".to_string(),
            session_id: s2.session_id.clone(),
            stage: idse_core::domain::Stage::Feedback,
            created_at: chrono::Utc::now(),
            has_contradiction_signal: false,
        },
    ];

    let outcome = claims::evaluate_promotion(
        &fx.storage,
        fx.project.id,
        "Every migration is additive.",
        Classification::Invariant,
        &evidence,
        &claims::GateConfig {
            temporal_stability_days: 7,
            duplicate_similarity_threshold: 0.98,
        },
    )
    .await
    .expect("promote");

    let claim = outcome.claim.expect("gate should allow diverse, stable, feedback-backed evidence");
    assert_eq!(claim.origin, Origin::Converged);
    assert_eq!(claim.promotion_record_id, Some(outcome.record.id));
    assert!(claim.origin_is_consistent());
}

#[tokio::test]
async fn ensure_schema_is_idempotent_across_repeated_opens() {
    let storage = idse_core::StorageEngine::open_in_memory().await.expect("open");
    idse_core::storage::ensure_schema(storage.pool()).await.expect("reapply");
    idse_core::storage::ensure_schema(storage.pool()).await.expect("reapply again");
    project_repo::save_project(storage.pool(), "p", "embedded_relational")
        .await
        .expect("schema still usable");
}
