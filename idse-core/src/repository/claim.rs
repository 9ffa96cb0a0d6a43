//! BlueprintClaim / PromotionRecord / ClaimLifecycleEvent persistence.
//!
//! These three tables are part of the spine schema owned by C1, so — like
//! every other spine table — C2 is the only component that touches them
//! with SQL. [`crate::claims`] (C3) calls only the functions in this module;
//! it never opens a connection itself.

use sqlx::{Row, SqlitePool, Sqlite, Transaction};

use super::{now, parse_timestamp};
use crate::domain::{
    ClaimId, ClaimLifecycleEvent, ClaimStatus, Classification, Decision, EventId, Origin,
    ProjectId, PromotionRecord, PromotionRecordId,
};
use crate::{Error, Result};

pub async fn insert_promotion_record(
    tx: &mut Transaction<'_, Sqlite>,
    project_id: ProjectId,
    candidate_claim_text: &str,
    classification: Classification,
    evidence_hash: &str,
    source_sessions: &[String],
    source_stages: &[String],
    feedback_artifacts: &[String],
    decision: Decision,
    reasons: &[String],
) -> Result<PromotionRecord> {
    let created_at = now();
    let id = sqlx::query(
        "INSERT INTO promotion_records
            (project_id, candidate_claim_text, classification, evidence_hash,
             source_sessions, source_stages, feedback_artifacts, decision, reasons, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(project_id.get())
    .bind(candidate_claim_text)
    .bind(classification.to_string())
    .bind(evidence_hash)
    .bind(serde_json::to_string(source_sessions)?)
    .bind(serde_json::to_string(source_stages)?)
    .bind(serde_json::to_string(feedback_artifacts)?)
    .bind(decision.to_string())
    .bind(serde_json::to_string(reasons)?)
    .bind(created_at.to_rfc3339())
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(PromotionRecord {
        id: PromotionRecordId(id),
        project_id,
        candidate_claim_text: candidate_claim_text.to_string(),
        classification,
        evidence_hash: evidence_hash.to_string(),
        source_sessions: source_sessions.to_vec(),
        source_stages: source_stages.to_vec(),
        feedback_artifacts: feedback_artifacts.to_vec(),
        decision,
        reasons: reasons.to_vec(),
        created_at,
    })
}

/// Inserts a new `active` claim row. Rejects a pre-existing active claim
/// with identical `claim_text` (`spec.md` §3 unique-among-active invariant).
pub async fn insert_active_claim(
    tx: &mut Transaction<'_, Sqlite>,
    project_id: ProjectId,
    classification: Classification,
    claim_text: &str,
    origin: Origin,
    promotion_record_id: Option<PromotionRecordId>,
) -> Result<ClaimId> {
    let created_at = now();
    let id = sqlx::query(
        "INSERT INTO blueprint_claims
            (project_id, classification, claim_text, origin, status, promotion_record_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(project_id.get())
    .bind(classification.to_string())
    .bind(claim_text)
    .bind(origin.to_string())
    .bind(ClaimStatus::Active.to_string())
    .bind(promotion_record_id.map(PromotionRecordId::get))
    .bind(created_at.to_rfc3339())
    .execute(&mut **tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::conflict(format!("claim '{claim_text}' is already active"))
        }
        other => Error::from(other),
    })?
    .last_insert_rowid();

    Ok(ClaimId(id))
}

pub async fn find_active_claims(pool: &SqlitePool, project_id: ProjectId) -> Result<Vec<crate::domain::BlueprintClaim>> {
    let rows = sqlx::query(
        "SELECT id, project_id, classification, claim_text, origin, status, promotion_record_id, created_at, superseded_by
         FROM blueprint_claims WHERE project_id = ? AND status = 'active'",
    )
    .bind(project_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_claim_row).collect()
}

/// All promotion records for a project, oldest first. Unlike
/// [`find_active_claims`], this is not filtered by claim status — the
/// projection ledger (`spec.md` §4.5) shows every promotion attempt,
/// including denials and records behind superseded/invalidated claims.
pub async fn list_promotion_records(pool: &SqlitePool, project_id: ProjectId) -> Result<Vec<PromotionRecord>> {
    let rows = sqlx::query(
        "SELECT id, project_id, candidate_claim_text, classification, evidence_hash,
                source_sessions, source_stages, feedback_artifacts, decision, reasons, created_at
         FROM promotion_records WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_promotion_record_row).collect()
}

fn parse_promotion_record_row(row: sqlx::sqlite::SqliteRow) -> Result<PromotionRecord> {
    let classification: String = row.get("classification");
    let decision: String = row.get("decision");
    let source_sessions: String = row.get("source_sessions");
    let source_stages: String = row.get("source_stages");
    let feedback_artifacts: String = row.get("feedback_artifacts");
    let reasons: String = row.get("reasons");

    Ok(PromotionRecord {
        id: PromotionRecordId(row.get("id")),
        project_id: ProjectId(row.get("project_id")),
        candidate_claim_text: row.get("candidate_claim_text"),
        classification: classification
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid classification '{classification}'")))?,
        evidence_hash: row.get("evidence_hash"),
        source_sessions: serde_json::from_str(&source_sessions)?,
        source_stages: serde_json::from_str(&source_stages)?,
        feedback_artifacts: serde_json::from_str(&feedback_artifacts)?,
        decision: decision
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid decision '{decision}'")))?,
        reasons: serde_json::from_str(&reasons)?,
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
    })
}

/// Every claim regardless of status, oldest first — the projection's
/// `blueprint` view shows superseded/invalidated claims inline alongside
/// active ones (`spec.md` §4.5).
pub async fn list_all_claims(pool: &SqlitePool, project_id: ProjectId) -> Result<Vec<crate::domain::BlueprintClaim>> {
    let rows = sqlx::query(
        "SELECT id, project_id, classification, claim_text, origin, status, promotion_record_id, created_at, superseded_by
         FROM blueprint_claims WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_claim_row).collect()
}

pub async fn load_claim(pool: &SqlitePool, id: ClaimId) -> Result<crate::domain::BlueprintClaim> {
    let row = sqlx::query(
        "SELECT id, project_id, classification, claim_text, origin, status, promotion_record_id, created_at, superseded_by
         FROM blueprint_claims WHERE id = ?",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("claim", id))?;

    parse_claim_row(row)
}

pub async fn set_claim_status(
    pool: &SqlitePool,
    id: ClaimId,
    new_status: ClaimStatus,
    superseded_by: Option<ClaimId>,
) -> Result<()> {
    sqlx::query("UPDATE blueprint_claims SET status = ?, superseded_by = ? WHERE id = ?")
        .bind(new_status.to_string())
        .bind(superseded_by.map(ClaimId::get))
        .bind(id.get())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_lifecycle_event(
    pool: &SqlitePool,
    claim_id: ClaimId,
    old_status: Option<ClaimStatus>,
    new_status: ClaimStatus,
    reason: &str,
    actor: &str,
) -> Result<ClaimLifecycleEvent> {
    let created_at = now();
    let id = sqlx::query(
        "INSERT INTO claim_lifecycle_events (claim_id, old_status, new_status, reason, actor, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(claim_id.get())
    .bind(old_status.map(|s| s.to_string()))
    .bind(new_status.to_string())
    .bind(reason)
    .bind(actor)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(ClaimLifecycleEvent {
        id: EventId(id),
        claim_id,
        old_status,
        new_status,
        reason: reason.to_string(),
        actor: actor.to_string(),
        created_at,
    })
}

pub async fn list_events_for_claim(pool: &SqlitePool, claim_id: ClaimId) -> Result<Vec<ClaimLifecycleEvent>> {
    let rows = sqlx::query(
        "SELECT id, claim_id, old_status, new_status, reason, actor, created_at
         FROM claim_lifecycle_events WHERE claim_id = ? ORDER BY id",
    )
    .bind(claim_id.get())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_event_row).collect()
}

fn parse_claim_row(row: sqlx::sqlite::SqliteRow) -> Result<crate::domain::BlueprintClaim> {
    let classification: String = row.get("classification");
    let origin: String = row.get("origin");
    let status: String = row.get("status");
    let promotion_record_id: Option<i64> = row.get("promotion_record_id");
    let superseded_by: Option<i64> = row.get("superseded_by");

    Ok(crate::domain::BlueprintClaim {
        id: ClaimId(row.get("id")),
        project_id: ProjectId(row.get("project_id")),
        classification: classification
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid classification '{classification}'")))?,
        claim_text: row.get("claim_text"),
        origin: origin
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid origin '{origin}'")))?,
        status: status
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid claim status '{status}'")))?,
        promotion_record_id: promotion_record_id.map(PromotionRecordId),
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
        superseded_by: superseded_by.map(ClaimId),
    })
}

fn parse_event_row(row: sqlx::sqlite::SqliteRow) -> Result<ClaimLifecycleEvent> {
    let old_status: Option<String> = row.get("old_status");
    let new_status: String = row.get("new_status");
    Ok(ClaimLifecycleEvent {
        id: EventId(row.get("id")),
        claim_id: ClaimId(row.get("claim_id")),
        old_status: old_status
            .map(|s| s.parse())
            .transpose()
            .map_err(|_| Error::Corruption("invalid old_status".to_string()))?,
        new_status: new_status
            .parse()
            .map_err(|_| Error::Corruption(format!("invalid new_status '{new_status}'")))?,
        reason: row.get("reason"),
        actor: row.get("actor"),
        created_at: parse_timestamp(row.get::<String, _>("created_at").as_str())?,
    })
}
