//! Configuration loading from a workspace file and environment overrides.

use std::path::Path;

use super::types::Config;
use crate::Result;

/// Load configuration: defaults, then `<workspace>/idse.toml` if present,
/// then `IDSE_*` environment overrides, then validation.
pub fn load_config(workspace_dir: &Path) -> Result<Config> {
    let config = Config::default();

    let config_path = workspace_dir.join("idse.toml");
    let config = if config_path.exists() {
        load_toml_file(&config_path)?
    } else {
        config
    };

    let config = apply_env_overrides(config);
    config.validate()?;
    Ok(config)
}

pub fn load_toml_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    Ok(config)
}

fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(backend) = std::env::var("IDSE_SYNC_BACKEND") {
        config.sync_backend = backend;
    }
    if let Ok(anchor) = std::env::var("IDSE_REMOTE_ANCHOR") {
        config.remote.anchor = Some(anchor);
    }
    if let Ok(dir) = std::env::var("IDSE_REMOTE_CREDENTIALS_DIR") {
        config.remote.credentials_dir = Some(dir);
    }
    if let Ok(n) = std::env::var("IDSE_REMOTE_CONCURRENCY") {
        if let Ok(n) = n.parse() {
            config.remote.concurrency = n;
        }
    }
    config
}
