//! The promotion gate — a pure function over a candidate claim and its
//! evidence (`spec.md` §4.3.2). Zero I/O; the impure shell in
//! [`super::lifecycle`] resolves evidence and existing claims from C2 and
//! calls this.

use chrono::{DateTime, Utc};

use crate::domain::{Classification, Stage};
use crate::error::GateCode;

use super::similarity::cosine_similarity;

/// One piece of evidence backing a candidate claim.
#[derive(Debug, Clone)]
pub struct EvidenceArtifact {
    pub idse_id: String,
    pub session_id: String,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    pub has_contradiction_signal: bool,
}

/// An existing active claim in the project, checked for near-duplication.
#[derive(Debug, Clone)]
pub struct ExistingClaim {
    pub claim_text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    pub temporal_stability_days: u32,
    pub duplicate_similarity_threshold: f64,
}

#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub allowed: bool,
    /// All failing gate codes, in the deterministic evaluation order defined
    /// by `spec.md` §4.3.2. Empty iff `allowed`.
    pub reasons: Vec<GateCode>,
}

/// Evaluate every gate in the order mandated by `spec.md` §4.3.2, collecting
/// every failing code rather than stopping at the first (`spec.md` §7: "the
/// first failing code is reported plus the full list of failing codes").
#[must_use]
pub fn evaluate(
    candidate_classification: Classification,
    candidate_text: &str,
    evidence: &[EvidenceArtifact],
    existing_active_claims: &[ExistingClaim],
    config: &GateConfig,
) -> GateOutcome {
    let mut reasons = Vec::new();

    if !is_constitutional(candidate_classification) {
        reasons.push(GateCode::NotConstitutional);
    }

    let distinct_sessions = distinct_count(evidence.iter().map(|e| e.session_id.as_str()));
    if distinct_sessions < 2 {
        reasons.push(GateCode::InsufficientSessionDiversity);
    }

    let distinct_stages = distinct_count(evidence.iter().map(|e| e.stage.to_string()));
    if distinct_stages < 2 {
        reasons.push(GateCode::InsufficientStageDiversity);
    }

    if !temporal_stability_holds(evidence, config.temporal_stability_days) {
        reasons.push(GateCode::InsufficientTemporalStability);
    }

    if !evidence.iter().any(|e| e.stage == Stage::Feedback) {
        reasons.push(GateCode::NoFeedbackEvidence);
    }

    if evidence.iter().any(|e| e.has_contradiction_signal) {
        reasons.push(GateCode::ContradictedByFeedback);
    }

    if existing_active_claims.iter().any(|existing| {
        cosine_similarity(candidate_text, &existing.claim_text)
            >= config.duplicate_similarity_threshold
    }) {
        reasons.push(GateCode::DuplicateStatement);
    }

    GateOutcome {
        allowed: reasons.is_empty(),
        reasons,
    }
}

/// All four `Classification` variants are constitutional by construction;
/// this check exists for structural symmetry with `spec.md` §4.3.2 and
/// always passes for the current closed enum.
const fn is_constitutional(_classification: Classification) -> bool {
    true
}

fn distinct_count<'a, I, T>(items: I) -> usize
where
    I: Iterator<Item = T>,
    T: Eq + std::hash::Hash + 'a,
{
    items.collect::<std::collections::HashSet<_>>().len()
}

fn temporal_stability_holds(evidence: &[EvidenceArtifact], stability_days: u32) -> bool {
    let Some(min_ts) = evidence.iter().map(|e| e.created_at).min() else {
        return false;
    };
    let Some(max_ts) = evidence.iter().map(|e| e.created_at).max() else {
        return false;
    };
    (max_ts - min_ts) >= chrono::Duration::days(i64::from(stability_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn evidence(session: &str, stage: Stage, offset_days: i64, contradiction: bool) -> EvidenceArtifact {
        EvidenceArtifact {
            idse_id: format!("orch::{session}::{stage}"),
            session_id: session.to_string(),
            stage,
            created_at: Utc::now() - Duration::days(offset_days),
            has_contradiction_signal: contradiction,
        }
    }

    fn config() -> GateConfig {
        GateConfig {
            temporal_stability_days: 7,
            duplicate_similarity_threshold: 0.98,
        }
    }

    #[test]
    fn sufficient_diverse_evidence_is_allowed() {
        let evidence = vec![
            evidence("s1", Stage::Spec, 10, false),
            evidence("s2", Stage::Feedback, 0, false),
        ];
        let outcome = evaluate(Classification::Invariant, "A claim.", &evidence, &[], &config());
        assert!(outcome.allowed);
        assert!(outcome.reasons.is_empty());
    }

    #[test]
    fn single_session_is_denied_with_diversity_code() {
        let evidence = vec![
            evidence("s1", Stage::Spec, 10, false),
            evidence("s1", Stage::Feedback, 0, false),
        ];
        let outcome = evaluate(Classification::Invariant, "A claim.", &evidence, &[], &config());
        assert!(!outcome.allowed);
        assert!(outcome.reasons.contains(&GateCode::InsufficientSessionDiversity));
    }

    #[test]
    fn exactly_two_sessions_two_stages_seven_days_is_allowed() {
        let evidence = vec![
            evidence("s1", Stage::Spec, 7, false),
            evidence("s2", Stage::Feedback, 0, false),
        ];
        let outcome = evaluate(Classification::Invariant, "A claim.", &evidence, &[], &config());
        assert!(outcome.allowed);
    }

    #[test]
    fn duplicate_statement_at_threshold_is_denied() {
        let evidence = vec![
            evidence("s1", Stage::Spec, 10, false),
            evidence("s2", Stage::Feedback, 0, false),
        ];
        let existing = vec![ExistingClaim {
            claim_text: "A claim.".to_string(),
        }];
        let outcome = evaluate(Classification::Invariant, "A claim.", &evidence, &existing, &config());
        assert!(!outcome.allowed);
        assert!(outcome.reasons.contains(&GateCode::DuplicateStatement));
    }

    #[test]
    fn contradiction_signal_denies() {
        let evidence = vec![
            evidence("s1", Stage::Spec, 10, false),
            evidence("s2", Stage::Feedback, 0, true),
        ];
        let outcome = evaluate(Classification::Invariant, "A claim.", &evidence, &[], &config());
        assert!(outcome.reasons.contains(&GateCode::ContradictedByFeedback));
    }
}
