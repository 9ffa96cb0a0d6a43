//! Component — parsed from implementation artifacts; enforces the
//! "artifact → component → primitive" mandatory chain (`spec.md` §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Projection,
    Operation,
    Infrastructure,
    Routing,
    Artifact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub component_type: ComponentType,
    pub source_file: String,
    pub parent_primitives: Vec<String>,
    pub last_seen_in_session: String,
    pub last_updated_at: DateTime<Utc>,
}
