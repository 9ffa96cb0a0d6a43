//! Content-addressed, SQLite-backed storage spine for the IDSE design-time
//! documentation system.
//!
//! Seven components, each its own module:
//!
//! - [`storage`] — C1 StorageEngine: connection pool, schema migrations, transactions.
//! - [`repository`] — C2 ArtifactRepository: the only component touching spine SQL directly.
//! - [`claims`] — C3 ClaimLifecycle: dual-entry claim promotion and supersession.
//! - [`validation`] — C4 ValidationEngine: stage rule evaluation and completion gating.
//! - [`projection`] — C5 ProjectionFileView: renders `blueprint.md` / `meta.md`.
//! - [`remote`] — C6/C7 RemoteProjector / SchemaMap: hash-gated push/pull.
//!
//! [`domain`] holds the shared data model; [`config`] the configuration
//! layer; [`hash`] the content-addressing primitives; [`error`] the shared
//! error taxonomy.

pub mod claims;
pub mod config;
pub mod domain;
pub mod error;
pub mod hash;
pub mod projection;
pub mod remote;
pub mod repository;
pub mod storage;
pub mod validation;

pub use error::{Error, Result};
pub use storage::StorageEngine;
