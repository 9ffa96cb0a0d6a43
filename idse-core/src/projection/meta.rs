//! Renders `meta.md` from a [`ProjectSnapshot`] (`spec.md` §4.5).
//!
//! `meta` lists active sessions — `draft`, `in_progress`, `review`, plus the
//! blueprint session — alongside the full session lineage graph, which
//! includes every session regardless of status. Promotion records are
//! de-duplicated for presentation by `(claim_text, evidence_hash)`, keeping
//! only the latest entry; the underlying ledger in `blueprint.md` is never
//! altered by this.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::domain::Stage;

use super::snapshot::ProjectSnapshot;

#[must_use]
pub fn render(snapshot: &ProjectSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {} — Meta\n", snapshot.project.name);

    let _ = writeln!(out, "## Active Sessions\n");
    for session in &snapshot.sessions {
        if session.is_blueprint() || session.status.is_active_for_meta_view() {
            render_session_line(&mut out, snapshot, session);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Session Lineage\n");
    for session in &snapshot.sessions {
        render_session_line(&mut out, snapshot, session);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Recent Promotions\n");
    for record in latest_promotion_per_candidate(snapshot) {
        let _ = writeln!(
            out,
            "- {} `{}` ({})",
            record.decision, record.candidate_claim_text, record.classification
        );
    }

    out
}

fn render_session_line(out: &mut String, snapshot: &ProjectSnapshot, session: &crate::domain::Session) {
    let stage_count = snapshot
        .artifacts_by_session
        .get(&session.id)
        .map_or(0, |artifacts| artifacts.len());
    let furthest_stage = snapshot
        .artifacts_by_session
        .get(&session.id)
        .and_then(|artifacts| artifacts.iter().map(|a| a.stage).max_by_key(stage_rank));
    let _ = writeln!(
        out,
        "- `{}` ({}, {}) — {}/{} stages, furthest: {}",
        session.session_id,
        session.session_type,
        session.status,
        stage_count,
        Stage::required_pipeline().len(),
        furthest_stage.map_or_else(|| "none".to_string(), |s| s.to_string()),
    );
}

fn stage_rank(stage: &Stage) -> usize {
    stage.pipeline_order().unwrap_or(usize::MAX)
}

fn latest_promotion_per_candidate(
    snapshot: &ProjectSnapshot,
) -> impl Iterator<Item = &crate::domain::PromotionRecord> {
    let mut latest: HashMap<(&str, &str), &crate::domain::PromotionRecord> = HashMap::new();
    for record in &snapshot.promotion_records {
        let key = (record.candidate_claim_text.as_str(), record.evidence_hash.as_str());
        match latest.get(&key) {
            Some(existing) if existing.created_at >= record.created_at => {}
            _ => {
                latest.insert(key, record);
            }
        }
    }
    let mut records: Vec<_> = latest.into_values().collect();
    records.sort_by_key(|r| r.created_at);
    records.into_iter()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Duration, Utc};

    use crate::domain::{Classification, Decision, Project, ProjectId, PromotionRecordId};

    use super::*;

    fn base_snapshot() -> ProjectSnapshot {
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

    fn record(id: i64, text: &str, evidence: &str, age_secs: i64, decision: Decision) -> crate::domain::PromotionRecord {
        crate::domain::PromotionRecord {
            id: PromotionRecordId(id),
            project_id: ProjectId(1),
            candidate_claim_text: text.to_string(),
            classification: Classification::Invariant,
            evidence_hash: evidence.to_string(),
            source_sessions: Vec::new(),
            source_stages: Vec::new(),
            feedback_artifacts: Vec::new(),
            decision,
            reasons: Vec::new(),
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn deduplicates_promotion_records_keeping_latest() {
        let mut snapshot = base_snapshot();
        snapshot
            .promotion_records
            .push(record(1, "claim a", "ev1", 100, Decision::Deny));
        snapshot
            .promotion_records
            .push(record(2, "claim a", "ev1", 10, Decision::Allow));

        let deduped: Vec<_> = latest_promotion_per_candidate(&snapshot).collect();
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, PromotionRecordId(2));
    }
}
