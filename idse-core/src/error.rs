//! Error taxonomy for the artifact spine.
//!
//! Every component surfaces one of the kinds named in the design: storage
//! errors propagate untouched from C1/C2, while C3/C6 wrap more specific
//! shapes (`GateDenied`, `TransportError`) that callers match on directly
//! rather than string-sniffing a flat error type.

use std::fmt;

use crate::validation::ValidationReport;

/// Result type used across the spine.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for all spine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("lifecycle violation: {0}")]
    LifecycleViolation(String),

    #[error("promotion denied: {0:?}")]
    GateDenied(Vec<GateCode>),

    #[error("completion blocked")]
    CompletionBlocked(ValidationReport),

    #[error("storage I/O error: {0}")]
    StorageIo(String),

    #[error("database corruption: {0}")]
    Corruption(String),

    #[error("remote transport error: {0}")]
    TransportError(String),

    #[error("remote rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("remote auth error: {0}")]
    AuthError(String),

    #[error("remote schema mismatch: {0}")]
    RemoteSchemaMismatch(String),

    #[error("deadline exceeded")]
    Timeout,
}

impl Error {
    #[must_use]
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{entity} '{id}'"))
    }

    #[must_use]
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }

    #[must_use]
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation(reason.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("row not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            other => Self::StorageIo(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::StorageIo(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::StorageIo(format!("json: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::InvariantViolation(format!("config: {err}"))
    }
}

/// Promotion gate failure codes, evaluated and reported in the deterministic
/// order defined in `spec.md` §4.3.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateCode {
    NotConstitutional,
    InsufficientSessionDiversity,
    InsufficientStageDiversity,
    InsufficientTemporalStability,
    NoFeedbackEvidence,
    ContradictedByFeedback,
    DuplicateStatement,
}

impl fmt::Display for GateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotConstitutional => "NOT_CONSTITUTIONAL",
            Self::InsufficientSessionDiversity => "INSUFFICIENT_SESSION_DIVERSITY",
            Self::InsufficientStageDiversity => "INSUFFICIENT_STAGE_DIVERSITY",
            Self::InsufficientTemporalStability => "INSUFFICIENT_TEMPORAL_STABILITY",
            Self::NoFeedbackEvidence => "NO_FEEDBACK_EVIDENCE",
            Self::ContradictedByFeedback => "CONTRADICTED_BY_FEEDBACK",
            Self::DuplicateStatement => "DUPLICATE_STATEMENT",
        };
        write!(f, "{s}")
    }
}

/// Error kinds surfaced by the remote projector (C6). Kept distinct from
/// [`Error`] so batch summaries can carry one per failed artifact without
/// collapsing into a single string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    TransportError(String),

    #[error("remote schema mismatch: {0}")]
    RemoteSchemaMismatch(String),

    #[error("auth error: {0}")]
    AuthError(String),

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::TransportError(m) => Self::TransportError(m),
            RemoteError::RemoteSchemaMismatch(m) => Self::RemoteSchemaMismatch(m),
            RemoteError::AuthError(m) => Self::AuthError(m),
            RemoteError::RateLimited { retry_after_ms } => Self::RateLimited { retry_after_ms },
            RemoteError::NotFound => Self::NotFound("remote row".to_string()),
            RemoteError::Conflict(m) => Self::Conflict(m),
        }
    }
}
