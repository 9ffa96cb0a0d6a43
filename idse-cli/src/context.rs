//! Shared setup: every subcommand operates against a workspace directory
//! (`.` by default) holding `idse.toml` and the `.idse/spine.db` database.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use idse_core::config::Config;
use idse_core::StorageEngine;

pub struct Context {
    pub storage: StorageEngine,
    pub config: Config,
    pub workspace_dir: PathBuf,
}

pub async fn open(workspace_dir: &Path) -> Result<Context> {
    let config = idse_core::config::load_config(workspace_dir).context("loading idse.toml")?;
    let db_dir = workspace_dir.join(".idse");
    std::fs::create_dir_all(&db_dir).context("creating .idse directory")?;
    let storage = StorageEngine::open(&db_dir.join("spine.db"))
        .await
        .context("opening spine database")?;
    Ok(Context {
        storage,
        config,
        workspace_dir: workspace_dir.to_path_buf(),
    })
}
