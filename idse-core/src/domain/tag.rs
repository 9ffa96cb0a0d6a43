//! SessionTag — an unordered key/value bag used to derive optional remote
//! properties (layer, scope, version, capability) (`spec.md` §3).

use serde::{Deserialize, Serialize};

use super::SessionRowId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTag {
    pub session_id: SessionRowId,
    pub key: String,
    pub value: String,
}
