//! Configuration loading and validation.
//!
//! # Hierarchy
//!
//! 1. Built-in defaults
//! 2. `<workspace>/idse.toml`, if present
//! 3. Environment variables (`IDSE_*`), applied over the file
//!
//! # Module structure
//!
//! - `types`: configuration structure definitions (`spec.md` §6)
//! - `defaults`: `Default` impls
//! - `load`: loading from a path and merging in environment overrides
//! - `validate`: rejects nonsensical combinations

mod defaults;
mod load;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use load::load_config;
pub use types::{
    Config, PromotionConfig, RemotePropertyConfig, RemoteSection, ValidationSection, WriteMode,
};
