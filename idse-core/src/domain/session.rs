//! Session — a unit of work within a project (`spec.md` §3).
//!
//! Exactly one session per project has `session_id = "__blueprint__"` and
//! `session_type = Blueprint`; enforced by [`crate::repository::session_repo`],
//! not by this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ProjectId, SessionRowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Blueprint,
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Draft,
    InProgress,
    Review,
    Complete,
    Archived,
    Superseded,
}

impl SessionStatus {
    /// Statuses `meta` filters active sessions to, per `spec.md` §4.5.
    #[must_use]
    pub const fn is_active_for_meta_view(self) -> bool {
        matches!(self, Self::Draft | Self::InProgress | Self::Review)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionRowId,
    pub project_id: ProjectId,
    pub session_id: String,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn is_blueprint(&self) -> bool {
        self.session_id == super::BLUEPRINT_SESSION_ID
    }
}
