//! ValidationEngine (C4) — declarative rule evaluation over pipeline
//! artifacts, with completion gating (`spec.md` §4.4).
//!
//! Validation itself never fails; it always produces a [`ValidationReport`].
//! Only the completion transition surfaces a hard error.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::domain::{ArtifactRecord, Session, SessionStatus, Stage};
use crate::repository::{artifact as artifact_repo, session as session_repo, session_state as session_state_repo};
use crate::{Error, Result};

use super::report::{StageReport, ValidationReport};
use super::rules;

/// Evaluates every required stage for `session`, persisting the resulting
/// report into `SessionState` (`spec.md` §4.4 Output: "The report is
/// persisted into `SessionState.validation_status`").
pub async fn validate_session(
    pool: &SqlitePool,
    config: &Config,
    session: &Session,
) -> Result<ValidationReport> {
    let artifacts = artifact_repo::list_by_session(pool, session.id.get()).await?;
    let by_stage: BTreeMap<Stage, &ArtifactRecord> =
        artifacts.iter().map(|a| (a.stage, a)).collect();

    let mut per_stage = BTreeMap::new();
    for (order, stage) in Stage::required_pipeline().iter().enumerate() {
        let report = match by_stage.get(stage) {
            Some(artifact) => evaluate_artifact(artifact, config, order, &by_stage),
            None => StageReport::failing(vec![format!("missing required stage artifact: {stage}")], Vec::new()),
        };
        per_stage.insert(*stage, report);
    }

    let report = ValidationReport::from_stage_reports(per_stage);
    session_state_repo::save_validation_status(pool, session.id, &validation_status(&report))
        .await?;
    Ok(report)
}

fn evaluate_artifact(
    artifact: &ArtifactRecord,
    config: &Config,
    order: usize,
    by_stage: &BTreeMap<Stage, &ArtifactRecord>,
) -> StageReport {
    let mut errors = Vec::new();

    if let Some(marker_error) = rules::check_no_placeholder_markers(artifact) {
        errors.push(marker_error);
    }

    if let Some(required) = config.validation.required_sections.get(&artifact.stage.to_string()) {
        errors.extend(rules::check_required_sections(artifact, required));
    }

    errors.extend(rules::check_implementation_quality(artifact));

    for earlier_stage in &Stage::required_pipeline()[..order] {
        if !by_stage.contains_key(earlier_stage) {
            errors.push(format!(
                "stage ordering violation: {} requires {earlier_stage} to exist first",
                artifact.stage
            ));
        }
    }

    StageReport::failing(errors, Vec::new())
}

fn validation_status(report: &ValidationReport) -> crate::domain::ValidationStatus {
    report
        .per_stage
        .iter()
        .map(|(stage, stage_report)| {
            let state = if stage_report.ok {
                crate::domain::StageState::passing(crate::repository::now())
            } else {
                crate::domain::StageState::failing(
                    crate::repository::now(),
                    stage_report.errors.clone(),
                    stage_report.warnings.clone(),
                )
            };
            (*stage, state)
        })
        .collect()
}

/// `spec.md` §4.4 completion gate: a session may transition to `complete`
/// only when validation passes for every required stage.
///
/// # Errors
///
/// Returns `Error::CompletionBlocked(report)` if any required stage fails
/// validation.
pub async fn set_status_checked(
    pool: &SqlitePool,
    config: &Config,
    session: &Session,
    new_status: SessionStatus,
) -> Result<()> {
    if matches!(new_status, SessionStatus::Complete) {
        let report = validate_session(pool, config, session).await?;
        if !report.ok {
            tracing::warn!(session_id = session.id.get(), "completion blocked by validation report");
            return Err(Error::CompletionBlocked(report));
        }
    }
    session_repo::set_status(pool, session.id, new_status).await
}
