//! ClaimLifecycle (C3) — the blueprint claim lifecycle and promotion gate
//! (`spec.md` §4.3).
//!
//! `gate` is the pure functional core; `lifecycle` is the imperative shell
//! that resolves evidence from C2, calls the gate, and persists results.

pub mod gate;
pub mod lifecycle;
pub mod similarity;

pub use gate::{EvidenceArtifact, ExistingClaim, GateConfig, GateOutcome};
pub use lifecycle::{
    declare_claim, evaluate_promotion, invalidate_claim, reinforce_claim, supersede_claim,
    PromotionOutcome,
};
