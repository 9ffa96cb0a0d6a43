//! Renders `blueprint.md` from a [`ProjectSnapshot`] — a pure function of
//! in-memory state, per `spec.md` §4.5: "The projection is a pure function
//! of the DB."
//!
//! `blueprint` is append-only with respect to admitted claims: superseded
//! and invalidated claims stay in the ledger section but are also reflected,
//! with their current status, in the canonical sections above it.

use std::fmt::Write as _;

use crate::domain::{ClaimStatus, Origin};

use super::snapshot::ProjectSnapshot;

#[must_use]
pub fn render(snapshot: &ProjectSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {} — Blueprint\n", snapshot.project.name);
    let _ = writeln!(out, "Stack: {}\n", snapshot.project.stack);

    let _ = writeln!(out, "## Core Invariants\n");
    for claim in invariant_claims(snapshot) {
        render_claim_line(&mut out, claim);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Boundaries & Ownership Rules\n");
    for claim in snapshot
        .claims
        .iter()
        .filter(|c| !matches!(c.classification, crate::domain::Classification::Invariant))
    {
        render_claim_line(&mut out, claim);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Ledger\n");
    let _ = writeln!(out, "Append-only; entries are never reordered or removed.\n");
    for record in &snapshot.promotion_records {
        let _ = writeln!(
            out,
            "- [{}] {} `{}` ({}) — {}",
            record.created_at.to_rfc3339(),
            record.decision,
            record.candidate_claim_text,
            record.classification,
            if record.reasons.is_empty() {
                "no blocking reasons".to_string()
            } else {
                record.reasons.join(", ")
            }
        );
    }
    for events in snapshot.lifecycle_events_by_claim.values() {
        for event in events {
            let from = event
                .old_status
                .map_or_else(|| "new".to_string(), |s| s.to_string());
            let _ = writeln!(
                out,
                "- [{}] claim {} {} -> {}: {}",
                event.created_at.to_rfc3339(),
                event.claim_id,
                from,
                event.new_status,
                event.reason
            );
        }
    }

    out
}

fn invariant_claims(snapshot: &ProjectSnapshot) -> impl Iterator<Item = &crate::domain::BlueprintClaim> {
    snapshot
        .claims
        .iter()
        .filter(|c| matches!(c.classification, crate::domain::Classification::Invariant))
}

fn render_claim_line(out: &mut String, claim: &crate::domain::BlueprintClaim) {
    let origin_tag = match claim.origin {
        Origin::Declared => "declared",
        Origin::Converged => "converged",
    };
    let status_tag = match claim.status {
        ClaimStatus::Active => String::new(),
        ClaimStatus::Superseded => claim
            .superseded_by
            .map_or_else(|| " [superseded]".to_string(), |id| format!(" [superseded by {id}]")),
        ClaimStatus::Invalidated => " [invalidated]".to_string(),
    };
    let _ = writeln!(out, "- ({origin_tag}) {}{status_tag}", claim.claim_text);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use crate::domain::{Classification, ClaimId, ClaimStatus, Origin, Project, ProjectId};

    use super::*;

    fn empty_snapshot() -> ProjectSnapshot {
        ProjectSnapshot {
            project: Project {
                id: ProjectId(1),
                name: "demo".to_string(),
                stack: "rust".to_string(),
                created_at: Utc::now(),
            },
            sessions: Vec::new(),
            artifacts_by_session: BTreeMap::new(),
            claims: Vec::new(),
            promotion_records: Vec::new(),
            lifecycle_events_by_claim: BTreeMap::new(),
        }
    }

    #[test]
    fn superseded_claim_shown_with_status_in_canonical_section() {
        let mut snapshot = empty_snapshot();
        snapshot.claims.push(crate::domain::BlueprintClaim {
            id: ClaimId(1),
            project_id: ProjectId(1),
            classification: Classification::Invariant,
            claim_text: "all writes go through the repository layer".to_string(),
            origin: Origin::Declared,
            status: ClaimStatus::Superseded,
            promotion_record_id: None,
            created_at: Utc::now(),
            superseded_by: Some(ClaimId(2)),
        });

        let rendered = render(&snapshot);
        assert!(rendered.contains("superseded by"));
        assert!(rendered.contains("all writes go through the repository layer"));
    }
}
