//! RemoteProjector (C6) and SchemaMap (C7) — hash-gated push/pull against a
//! generic remote row-store (`spec.md` §4.6, §4.7).

pub mod backend;
pub mod batch;
pub mod mock;
pub mod pull;
pub mod push;
pub mod schema_map;

pub use backend::{QueryFilter, RemoteBackend, RemoteRow};
pub use batch::BatchSummary;
pub use mock::MockRemoteBackend;
pub use pull::{pull_artifact, pull_batch};
pub use push::{push_artifact, push_batch, PushOutcome};
pub use schema_map::{PropertyContext, SchemaMap};
