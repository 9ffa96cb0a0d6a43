//! Configuration type definitions.
//!
//! Pure data holders, no behavior; mirrors `spec.md` §6's configuration
//! table field-for-field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    CreateOnly,
    AlwaysSync,
    Optional,
}

/// One remote property mapping: a logical spine field to a concrete remote
/// property name, type, and write mode (`spec.md` §4.7 SchemaMap contract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePropertyConfig {
    pub remote_name: String,
    pub remote_type: String,
    pub write_mode: WriteMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    pub anchor: Option<String>,
    pub credentials_dir: Option<String>,
    pub tool_names: HashMap<String, String>,
    pub properties: HashMap<String, RemotePropertyConfig>,
    pub concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    pub required_sections: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionConfig {
    pub temporal_stability_days: u32,
    pub duplicate_similarity_threshold: f64,
}

/// Root configuration structure.
///
/// Loaded from defaults → workspace file → environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_backend: String,
    pub sync_backend: String,
    pub remote: RemoteSection,
    pub validation: ValidationSection,
    pub promotion: PromotionConfig,
}
