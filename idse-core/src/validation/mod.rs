//! ValidationEngine (C4) — declarative rule evaluation over pipeline
//! artifacts; completion gating (`spec.md` §4.4).

pub mod engine;
pub mod report;
pub mod rules;

pub use engine::{set_status_checked, validate_session};
pub use report::{StageReport, ValidationReport};
