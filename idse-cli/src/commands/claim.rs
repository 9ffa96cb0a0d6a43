use anyhow::{Context as _, Result};
use idse_core::claims::{self, EvidenceArtifact, GateConfig};
use idse_core::domain::{ClaimId, Classification, BLUEPRINT_SESSION_ID};
use idse_core::repository::{artifact as artifact_repo, project as project_repo, session as session_repo};

use crate::cli::{ClaimAction, ClassificationArg};
use crate::context::Context;

pub async fn run(ctx: &Context, action: ClaimAction) -> Result<()> {
    match action {
        ClaimAction::Declare {
            project,
            text,
            classification,
            actor,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;
            let claim = claims::declare_claim(
                &ctx.storage,
                project.id,
                &text,
                classification_from_arg(classification),
                BLUEPRINT_SESSION_ID,
                &actor,
            )
            .await?;
            println!("claim {} declared ({:?})", claim.id, claim.status);
        }
        ClaimAction::Promote {
            project,
            text,
            classification,
            evidence_idse_ids,
        } => {
            let project = project_repo::find_by_name(ctx.storage.pool(), &project)
                .await?
                .context("no such project")?;

            let mut evidence = Vec::with_capacity(evidence_idse_ids.len());
            for idse_id in &evidence_idse_ids {
                let artifact = artifact_repo::find_by_idse_id(ctx.storage.pool(), idse_id)
                    .await?
                    .with_context(|| format!("no artifact with idse_id '{idse_id}'"))?;
                let session = session_repo::load_session(ctx.storage.pool(), artifact.session_id).await?;
                evidence.push(EvidenceArtifact {
                    idse_id: artifact.idse_id.clone(),
                    session_id: session.session_id,
                    stage: artifact.stage,
                    created_at: artifact.created_at,
                    has_contradiction_signal: false,
                });
            }

            let gate_config = GateConfig {
                temporal_stability_days: ctx.config.promotion.temporal_stability_days,
                duplicate_similarity_threshold: ctx.config.promotion.duplicate_similarity_threshold,
            };

            let outcome = claims::evaluate_promotion(
                &ctx.storage,
                project.id,
                &text,
                classification_from_arg(classification),
                &evidence,
                &gate_config,
            )
            .await?;

            match outcome.claim {
                Some(claim) => println!("promotion allowed: claim {} created", claim.id),
                None => println!("promotion denied: {:?}", outcome.record.reasons),
            }
        }
        ClaimAction::Supersede {
            claim_id,
            superseding_claim_id,
            reason,
            actor,
        } => {
            let event = claims::supersede_claim(
                &ctx.storage,
                ClaimId(claim_id),
                ClaimId(superseding_claim_id),
                &reason,
                &actor,
            )
            .await?;
            println!("claim {} -> {}", event.claim_id, event.new_status);
        }
        ClaimAction::Invalidate { claim_id, reason, actor } => {
            let event = claims::invalidate_claim(&ctx.storage, ClaimId(claim_id), &reason, &actor).await?;
            println!("claim {} -> {}", event.claim_id, event.new_status);
        }
        ClaimAction::Reinforce {
            claim_id,
            session_id,
            stage,
            actor,
        } => {
            let event =
                claims::reinforce_claim(&ctx.storage, ClaimId(claim_id), &session_id, &stage, &actor).await?;
            println!("claim {}: {}", event.claim_id, event.reason);
        }
    }
    Ok(())
}

fn classification_from_arg(arg: ClassificationArg) -> Classification {
    match arg {
        ClassificationArg::Invariant => Classification::Invariant,
        ClassificationArg::Boundary => Classification::Boundary,
        ClassificationArg::OwnershipRule => Classification::OwnershipRule,
        ClassificationArg::NonNegotiableConstraint => Classification::NonNegotiableConstraint,
    }
}
