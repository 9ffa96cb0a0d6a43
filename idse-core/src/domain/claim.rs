//! BlueprintClaim, PromotionRecord, and ClaimLifecycleEvent — the dual-entry
//! claim lifecycle's data model (`spec.md` §3, §4.3, §9).
//!
//! `origin` is a tagged discriminator on a single entity rather than two
//! parallel tables, per the "Dual-entry lifecycle" design note in `spec.md`
//! §9: the nullable `promotion_record_id` captures the distinction without
//! forking the code path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ClaimId, ProjectId, PromotionRecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Invariant,
    Boundary,
    OwnershipRule,
    NonNegotiableConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Declared,
    Converged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Active,
    Superseded,
    Invalidated,
}

impl ClaimStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Superseded | Self::Invalidated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintClaim {
    pub id: ClaimId,
    pub project_id: ProjectId,
    pub classification: Classification,
    pub claim_text: String,
    pub origin: Origin,
    pub status: ClaimStatus,
    pub promotion_record_id: Option<PromotionRecordId>,
    pub created_at: DateTime<Utc>,
    pub superseded_by: Option<ClaimId>,
}

impl BlueprintClaim {
    /// `spec.md` §3: origin/promotion_record_id pairing invariant.
    #[must_use]
    pub fn origin_is_consistent(&self) -> bool {
        match self.origin {
            Origin::Converged => self.promotion_record_id.is_some(),
            Origin::Declared => self.promotion_record_id.is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub id: PromotionRecordId,
    pub project_id: ProjectId,
    pub candidate_claim_text: String,
    pub classification: Classification,
    pub evidence_hash: String,
    pub source_sessions: Vec<String>,
    pub source_stages: Vec<String>,
    pub feedback_artifacts: Vec<String>,
    pub decision: Decision,
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLifecycleEvent {
    pub id: super::EventId,
    pub claim_id: ClaimId,
    pub old_status: Option<ClaimStatus>,
    pub new_status: ClaimStatus,
    pub reason: String,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}
