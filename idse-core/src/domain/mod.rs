//! Domain types for the artifact spine.
//!
//! Follows the same shape as the teacher's beads domain: semantic newtypes
//! validated at construction, enums that make illegal states unrepresentable,
//! and plain structs for everything else. Parsing/row mapping lives in
//! [`crate::repository`], not here.

pub mod artifact;
pub mod claim;
pub mod component;
pub mod dependency;
pub mod ids;
pub mod project;
pub mod session;
pub mod session_state;
pub mod sync_metadata;
pub mod tag;

pub use artifact::{ArtifactRecord, Stage};
pub use claim::{
    BlueprintClaim, ClaimLifecycleEvent, ClaimStatus, Classification, Decision, Origin,
    PromotionRecord,
};
pub use component::{Component, ComponentType};
pub use dependency::{ArtifactDependency, DependencyDirection, DependencyType};
pub use ids::{
    ArtifactId, ClaimId, ComponentId, EventId, ProjectId, PromotionRecordId, SessionRowId,
};
pub use project::Project;
pub use session::{Session, SessionStatus, SessionType};
pub use session_state::{SessionState, StageState, ValidationStatus};
pub use sync_metadata::{SyncMetadata, SyncMetadataPatch};
pub use tag::SessionTag;

/// Natural-key identifier of the singleton blueprint session per project.
pub const BLUEPRINT_SESSION_ID: &str = "__blueprint__";
