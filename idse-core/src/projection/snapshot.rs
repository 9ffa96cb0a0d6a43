//! The in-memory state [`blueprint`](super::blueprint) and
//! [`meta`](super::meta) render from. Loading it is the only place in C5
//! that touches the database; the renderers themselves are pure functions
//! of this struct.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::domain::{
    ArtifactRecord, BlueprintClaim, ClaimLifecycleEvent, Project, ProjectId, PromotionRecord, Session, SessionRowId,
};
use crate::repository::{artifact as artifact_repo, claim as claim_repo, project as project_repo, session as session_repo};
use crate::Result;

pub struct ProjectSnapshot {
    pub project: Project,
    pub sessions: Vec<Session>,
    pub artifacts_by_session: BTreeMap<SessionRowId, Vec<ArtifactRecord>>,
    pub claims: Vec<BlueprintClaim>,
    pub promotion_records: Vec<PromotionRecord>,
    pub lifecycle_events_by_claim: BTreeMap<i64, Vec<ClaimLifecycleEvent>>,
}

pub async fn load(pool: &SqlitePool, project_id: ProjectId) -> Result<ProjectSnapshot> {
    let project = project_repo::load_project(pool, project_id).await?;
    let sessions = session_repo::list_by_project(pool, project_id).await?;

    let mut artifacts_by_session = BTreeMap::new();
    for session in &sessions {
        let artifacts = artifact_repo::list_by_session(pool, session.id.get()).await?;
        artifacts_by_session.insert(session.id, artifacts);
    }

    let claims = claim_repo::list_all_claims(pool, project_id).await?;
    let promotion_records = claim_repo::list_promotion_records(pool, project_id).await?;

    let mut lifecycle_events_by_claim = BTreeMap::new();
    for claim in &claims {
        let events = claim_repo::list_events_for_claim(pool, claim.id).await?;
        lifecycle_events_by_claim.insert(claim.id.get(), events);
    }

    Ok(ProjectSnapshot {
        project,
        sessions,
        artifacts_by_session,
        claims,
        promotion_records,
        lifecycle_events_by_claim,
    })
}
