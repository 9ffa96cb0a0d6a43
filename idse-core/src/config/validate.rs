//! Configuration validation — rejects nonsensical combinations.

use super::types::Config;
use crate::{Error, Result};

impl Config {
    /// # Errors
    ///
    /// Returns `Error::InvariantViolation` if `remote.anchor` is set while
    /// `sync_backend = "none"`, or if the duplicate-similarity threshold is
    /// outside `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<()> {
        if self.sync_backend == "none" && self.remote.anchor.is_some() {
            return Err(Error::invariant(
                "remote.anchor is set but sync_backend is \"none\"",
            ));
        }

        if !(0.0..=1.0).contains(&self.promotion.duplicate_similarity_threshold) {
            return Err(Error::invariant(
                "promotion.duplicate_similarity_threshold must be within [0.0, 1.0]",
            ));
        }

        if self.remote.concurrency == 0 {
            return Err(Error::invariant("remote.concurrency must be at least 1"));
        }

        Ok(())
    }
}
