//! `ValidationReport` — the output contract of `ValidationEngine` (`spec.md`
//! §4.4 Output).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl StageReport {
    #[must_use]
    pub fn passing() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn failing(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Deterministic ordering (`BTreeMap`) so two runs over identical state
/// serialize byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub per_stage: BTreeMap<Stage, StageReport>,
}

impl ValidationReport {
    #[must_use]
    pub fn from_stage_reports(per_stage: BTreeMap<Stage, StageReport>) -> Self {
        let ok = per_stage.values().all(|r| r.ok);
        Self { ok, per_stage }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation: {}", if self.ok { "ok" } else { "failed" })?;
        for (stage, report) in &self.per_stage {
            if report.ok {
                continue;
            }
            writeln!(f, "  {stage}:")?;
            for error in &report.errors {
                writeln!(f, "    - {error}")?;
            }
        }
        Ok(())
    }
}
