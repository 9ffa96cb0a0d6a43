//! Argument definitions for the `idse` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "idse")]
#[command(about = "Content-addressed artifact spine for design-time documentation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root (holds `idse.toml` and `.idse/spine.db`)
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or inspect a project
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Create or transition a session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Save or inspect a pipeline artifact
    Artifact {
        #[command(subcommand)]
        action: ArtifactAction,
    },
    /// Declare, promote, supersede, invalidate, or reinforce a blueprint claim
    Claim {
        #[command(subcommand)]
        action: ClaimAction,
    },
    /// Run the stage validation rules for a session
    Validate {
        project: String,
        session_id: String,
        /// Attempt to transition the session to `complete` (fails if validation is not clean)
        #[arg(long)]
        complete: bool,
    },
    /// Push or pull artifacts against a remote backend
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },
    /// Regenerate `blueprint.md` and `meta.md`
    View { project: String },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project, or return the existing one with this name
    Init {
        name: String,
        #[arg(long, default_value = "embedded_relational")]
        stack: String,
    },
    /// Print a project's current state
    Show { name: String },
}

#[derive(Subcommand)]
pub enum SessionAction {
    Create {
        project: String,
        session_id: String,
        #[arg(long, value_enum, default_value = "feature")]
        session_type: SessionTypeArg,
        #[arg(long)]
        owner: Option<String>,
    },
    SetStatus {
        project: String,
        session_id: String,
        #[arg(value_enum)]
        status: SessionStatusArg,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SessionTypeArg {
    Blueprint,
    Feature,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SessionStatusArg {
    Draft,
    InProgress,
    Review,
    Complete,
    Archived,
    Superseded,
}

#[derive(Subcommand)]
pub enum ArtifactAction {
    Save {
        project: String,
        session_id: String,
        #[arg(value_enum)]
        stage: StageArg,
        /// Path to the artifact content; reads stdin if omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    Show {
        project: String,
        session_id: String,
        #[arg(value_enum)]
        stage: StageArg,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StageArg {
    Intent,
    Context,
    Spec,
    Plan,
    Tasks,
    Implementation,
    Feedback,
    Metadata,
}

#[derive(Subcommand)]
pub enum ClaimAction {
    /// Found a claim directly from the `__blueprint__` session, bypassing the gate
    Declare {
        project: String,
        #[arg(long)]
        text: String,
        #[arg(long, value_enum)]
        classification: ClassificationArg,
        #[arg(long)]
        actor: String,
    },
    /// Evaluate the promotion gate over evidence artifacts and record the decision
    Promote {
        project: String,
        #[arg(long)]
        text: String,
        #[arg(long, value_enum)]
        classification: ClassificationArg,
        /// idse_id of an evidence artifact; repeat for more
        #[arg(long = "evidence")]
        evidence_idse_ids: Vec<String>,
    },
    Supersede {
        claim_id: i64,
        superseding_claim_id: i64,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        actor: String,
    },
    Invalidate {
        claim_id: i64,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        actor: String,
    },
    Reinforce {
        claim_id: i64,
        session_id: String,
        stage: String,
        #[arg(long)]
        actor: String,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ClassificationArg {
    Invariant,
    Boundary,
    OwnershipRule,
    NonNegotiableConstraint,
}

#[derive(Subcommand)]
pub enum SyncAction {
    Push { project: String, session_id: String },
    Pull { project: String, session_id: String },
}
