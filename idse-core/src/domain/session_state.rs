//! SessionState — per-session JSON blob keyed by stage (`spec.md` §3, §4.4).
//!
//! Regenerated from the DB on view export; the authoritative copy lives in
//! the DB, not in the generated projection files.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    pub ok: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl StageState {
    #[must_use]
    pub fn passing(validated_at: DateTime<Utc>) -> Self {
        Self {
            ok: true,
            validated_at: Some(validated_at),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn failing(validated_at: DateTime<Utc>, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            ok: false,
            validated_at: Some(validated_at),
            errors,
            warnings,
        }
    }
}

/// `BTreeMap` rather than `HashMap` so the serialized JSON (and therefore the
/// `meta` projection derived from it) is deterministic across runs.
pub type ValidationStatus = BTreeMap<Stage, StageState>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: super::SessionRowId,
    pub validation_status: ValidationStatus,
}
