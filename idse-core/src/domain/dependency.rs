//! ArtifactDependency — a directed edge between artifacts (`spec.md` §3, §9).
//!
//! The reverse (downstream) direction is derived by query, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ArtifactId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    Upstream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyDirection {
    Upstream,
    Downstream,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDependency {
    pub artifact_id: ArtifactId,
    pub depends_on_artifact_id: ArtifactId,
    pub dependency_type: DependencyType,
    pub created_at: DateTime<Utc>,
}
