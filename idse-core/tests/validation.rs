//! ValidationEngine (C4) completion gating (`spec.md` §4.4, §8).

mod common;

use idse_core::config::Config;
use idse_core::domain::{SessionStatus, Stage};
use idse_core::repository::artifact as artifact_repo;
use idse_core::{validation, Error};

async fn save(fx: &common::Fixture, stage: Stage, content: &str) {
    artifact_repo::save_artifact(fx.storage.pool(), &fx.session, &fx.project.name, stage, content)
        .await
        .expect("save artifact");
}

async fn complete_pipeline(fx: &common::Fixture) {
    save(fx, Stage::Intent, "Goal: ship it\nSuccess Criteria: it ships").await;
    save(fx, Stage::Context, "background").await;
    save(fx, Stage::Spec, "the spec body").await;
    save(fx, Stage::Plan, "the plan body").await;
    save(fx, Stage::Tasks, "the task list").await;
    save(
        fx,
        Stage::Implementation,
        "## Component Impact Report\n- auth::login_handler (parent: request_router)\n",
    )
    .await;
    save(fx, Stage::Feedback, "it works").await;
}

#[tokio::test]
async fn completion_is_blocked_by_an_implementation_artifact_missing_its_component_report() {
    let fx = common::bootstrap("orch", "s1").await;
    complete_pipeline(&fx).await;
    save(&fx, Stage::Implementation, "just some prose, no report").await;

    let config = Config::default();
    let err = validation::set_status_checked(fx.storage.pool(), &config, &fx.session, SessionStatus::Complete)
        .await
        .expect_err("completion must be blocked");

    match err {
        Error::CompletionBlocked(report) => {
            assert!(!report.ok);
            let implementation = &report.per_stage[&Stage::Implementation];
            assert!(!implementation.ok);
            assert!(implementation.errors.iter().any(|e| e.contains("Component Impact Report")));
        }
        other => panic!("expected CompletionBlocked, got {other:?}"),
    }
}

#[tokio::test]
async fn completion_succeeds_once_every_required_stage_is_clean() {
    let fx = common::bootstrap("orch", "s1").await;
    complete_pipeline(&fx).await;

    let config = Config::default();
    validation::set_status_checked(fx.storage.pool(), &config, &fx.session, SessionStatus::Complete)
        .await
        .expect("completion should succeed");

    let session = idse_core::repository::session::load_session(fx.storage.pool(), fx.session.id)
        .await
        .expect("reload session");
    assert_eq!(session.status, SessionStatus::Complete);
}

#[tokio::test]
async fn a_placeholder_marker_fails_validation_without_blocking_non_completion_transitions() {
    let fx = common::bootstrap("orch", "s1").await;
    save(&fx, Stage::Intent, "Goal: [REQUIRES INPUT]\nSuccess Criteria: tbd").await;

    let config = Config::default();
    let report = validation::validate_session(fx.storage.pool(), &config, &fx.session)
        .await
        .expect("validation itself never fails");
    assert!(!report.ok);
    assert!(!report.per_stage[&Stage::Intent].ok);
}
