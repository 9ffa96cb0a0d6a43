//! Project — the root of a workspace project tree (`spec.md` §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProjectId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub stack: String,
    pub created_at: DateTime<Utc>,
}
