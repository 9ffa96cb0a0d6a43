//! ProjectionFileView (C5) — renders the database into the two
//! human-readable workspace files (`spec.md` §4.5).

pub mod blueprint;
pub mod meta;
pub mod snapshot;
pub mod view;

pub use snapshot::ProjectSnapshot;
pub use view::export_views;
