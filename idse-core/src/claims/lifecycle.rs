//! The impure shell: resolves evidence/existing claims from C2, calls the
//! pure [`super::gate`], and persists the resulting rows — mirroring the
//! teacher's functional-core/imperative-shell split in `backup.rs`.

use sqlx::{Sqlite, Transaction};

use crate::domain::{
    BlueprintClaim, ClaimId, ClaimLifecycleEvent, ClaimStatus, Classification, Decision, Origin,
    ProjectId, PromotionRecord, Stage, BLUEPRINT_SESSION_ID,
};
use crate::error::GateCode;
use crate::hash;
use crate::repository::claim as claim_repo;
use crate::storage::StorageEngine;
use crate::{Error, Result};

use super::gate::{self, EvidenceArtifact, ExistingClaim, GateConfig};

/// `spec.md` §4.3.1 "Declare": only valid from `__blueprint__`, bypasses
/// convergence gates, rejects a duplicate active `claim_text`.
pub async fn declare_claim(
    storage: &StorageEngine,
    project_id: ProjectId,
    claim_text: &str,
    classification: Classification,
    source_session: &str,
    actor: &str,
) -> Result<BlueprintClaim> {
    if source_session != BLUEPRINT_SESSION_ID {
        return Err(Error::LifecycleViolation(
            "declare_claim requires source_session = \"__blueprint__\"".to_string(),
        ));
    }

    let claim_id = storage
        .within_transaction(move |tx: &mut Transaction<'_, Sqlite>| {
            let claim_text = claim_text.to_string();
            Box::pin(async move {
                let id = claim_repo::insert_active_claim(
                    tx,
                    project_id,
                    classification,
                    &claim_text,
                    Origin::Declared,
                    None,
                )
                .await?;
                Ok(id)
            })
        })
        .await?;

    claim_repo::insert_lifecycle_event(
        storage.pool(),
        claim_id,
        None,
        ClaimStatus::Active,
        &format!("Founding declaration by {actor}"),
        actor,
    )
    .await?;

    tracing::info!(claim_id = claim_id.get(), actor, "claim declared");

    claim_repo::load_claim(storage.pool(), claim_id).await
}

pub struct PromotionOutcome {
    pub record: PromotionRecord,
    pub claim: Option<BlueprintClaim>,
}

/// `spec.md` §4.3.1 "Promote" + §4.3.2 gate. Every decision (allow or deny)
/// creates a `PromotionRecord`; only `allow` also creates a claim row.
pub async fn evaluate_promotion(
    storage: &StorageEngine,
    project_id: ProjectId,
    candidate_text: &str,
    classification: Classification,
    evidence: &[EvidenceArtifact],
    config: &GateConfig,
) -> Result<PromotionOutcome> {
    let existing_rows = claim_repo::find_active_claims(storage.pool(), project_id).await?;
    let existing: Vec<ExistingClaim> = existing_rows
        .iter()
        .map(|c| ExistingClaim {
            claim_text: c.claim_text.clone(),
        })
        .collect();

    let outcome = gate::evaluate(classification, candidate_text, evidence, &existing, config);

    let idse_ids: Vec<String> = evidence.iter().map(|e| e.idse_id.clone()).collect();
    let feedback_artifact_ids: Vec<String> = evidence
        .iter()
        .filter(|e| e.stage == Stage::Feedback)
        .map(|e| e.idse_id.clone())
        .collect();
    let evidence_hash = hash::evidence_hash(&idse_ids, &feedback_artifact_ids);

    let source_sessions: Vec<String> = evidence.iter().map(|e| e.session_id.clone()).collect();
    let source_stages: Vec<String> = evidence.iter().map(|e| e.stage.to_string()).collect();
    let reasons: Vec<String> = outcome.reasons.iter().map(GateCode::to_string).collect();

    let decision = if outcome.allowed {
        Decision::Allow
    } else {
        Decision::Deny
    };

    let candidate_text_owned = candidate_text.to_string();
    let (record, claim_id) = storage
        .within_transaction(move |tx: &mut Transaction<'_, Sqlite>| {
            Box::pin(async move {
                let record = claim_repo::insert_promotion_record(
                    tx,
                    project_id,
                    &candidate_text_owned,
                    classification,
                    &evidence_hash,
                    &source_sessions,
                    &source_stages,
                    &feedback_artifact_ids,
                    decision,
                    &reasons,
                )
                .await?;

                let claim_id = if decision == Decision::Allow {
                    Some(
                        claim_repo::insert_active_claim(
                            tx,
                            project_id,
                            classification,
                            &candidate_text_owned,
                            Origin::Converged,
                            Some(record.id),
                        )
                        .await?,
                    )
                } else {
                    None
                };

                Ok((record, claim_id))
            })
        })
        .await?;

    tracing::info!(
        project_id = project_id.get(),
        decision = %record.decision,
        reasons = ?record.reasons,
        "promotion evaluated"
    );

    let claim = if let Some(claim_id) = claim_id {
        claim_repo::insert_lifecycle_event(
            storage.pool(),
            claim_id,
            None,
            ClaimStatus::Active,
            "Promoted via convergence gate",
            "system",
        )
        .await?;
        Some(claim_repo::load_claim(storage.pool(), claim_id).await?)
    } else {
        None
    };

    Ok(PromotionOutcome { record, claim })
}

/// `spec.md` §4.3.3: `active -> superseded`, recording `superseded_by`.
pub async fn supersede_claim(
    storage: &StorageEngine,
    claim_id: ClaimId,
    superseding_claim_id: ClaimId,
    reason: &str,
    actor: &str,
) -> Result<ClaimLifecycleEvent> {
    transition(
        storage,
        claim_id,
        ClaimStatus::Superseded,
        Some(superseding_claim_id),
        reason,
        actor,
    )
    .await
}

/// `spec.md` §4.3.3: `active -> invalidated`.
pub async fn invalidate_claim(
    storage: &StorageEngine,
    claim_id: ClaimId,
    reason: &str,
    actor: &str,
) -> Result<ClaimLifecycleEvent> {
    transition(storage, claim_id, ClaimStatus::Invalidated, None, reason, actor).await
}

async fn transition(
    storage: &StorageEngine,
    claim_id: ClaimId,
    new_status: ClaimStatus,
    superseded_by: Option<ClaimId>,
    reason: &str,
    actor: &str,
) -> Result<ClaimLifecycleEvent> {
    if reason.trim().is_empty() {
        return Err(Error::LifecycleViolation(
            "a reason is required for claim status transitions".to_string(),
        ));
    }

    let claim = claim_repo::load_claim(storage.pool(), claim_id).await?;
    if claim.status.is_terminal() {
        return Err(Error::LifecycleViolation(format!(
            "claim {claim_id} is already in terminal state {}",
            claim.status
        )));
    }

    claim_repo::set_claim_status(storage.pool(), claim_id, new_status, superseded_by).await?;
    tracing::info!(claim_id = claim_id.get(), old_status = %claim.status, new_status = %new_status, actor, "claim transitioned");
    claim_repo::insert_lifecycle_event(
        storage.pool(),
        claim_id,
        Some(claim.status),
        new_status,
        reason,
        actor,
    )
    .await
}

/// `spec.md` §4.3.3: `active -> active` with a non-empty reason, bookkeeping
/// only. `spec.md` §7: duplicate reinforcement events are idempotent — a
/// repeat call with the same session/stage returns the prior event rather
/// than appending a second one.
pub async fn reinforce_claim(
    storage: &StorageEngine,
    claim_id: ClaimId,
    reinforcing_session: &str,
    reinforcing_stage: &str,
    actor: &str,
) -> Result<ClaimLifecycleEvent> {
    let claim = claim_repo::load_claim(storage.pool(), claim_id).await?;
    if claim.status != ClaimStatus::Active {
        return Err(Error::LifecycleViolation(format!(
            "claim {claim_id} is not active"
        )));
    }

    let reason = format!("Reinforced by {reinforcing_session}:{reinforcing_stage}");

    let existing = claim_repo::list_events_for_claim(storage.pool(), claim_id).await?;
    if let Some(event) = existing.into_iter().find(|e| e.reason == reason) {
        return Ok(event);
    }

    claim_repo::insert_lifecycle_event(
        storage.pool(),
        claim_id,
        Some(ClaimStatus::Active),
        ClaimStatus::Active,
        &reason,
        actor,
    )
    .await
}
