//! Artifact — a stage-typed content blob belonging to a session (`spec.md` §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{ArtifactId, SessionRowId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intent,
    Context,
    Spec,
    Plan,
    Tasks,
    Implementation,
    Feedback,
    Metadata,
}

impl Stage {
    /// Stages required for completion gating (`spec.md` §4.4). `Metadata` is
    /// carried as a stage but is not part of the required pipeline.
    #[must_use]
    pub const fn required_pipeline() -> &'static [Self] {
        &[
            Self::Intent,
            Self::Context,
            Self::Spec,
            Self::Plan,
            Self::Tasks,
            Self::Implementation,
            Self::Feedback,
        ]
    }

    /// Position in the required pipeline, used for stage-ordering checks.
    /// `None` for stages outside the required pipeline (e.g. `Metadata`).
    #[must_use]
    pub fn pipeline_order(self) -> Option<usize> {
        Self::required_pipeline().iter().position(|s| *s == self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub id: ArtifactId,
    pub session_id: SessionRowId,
    pub stage: Stage,
    pub content: String,
    pub content_hash: String,
    pub idse_id: String,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
