//! Platform-aware configuration paths for metadeps

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Get the appropriate configuration directory for the current platform
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(custom_dir) = env::var("METADEPS_CONFIG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    dirs::config_dir()
        .map(|p| p.join("metadeps"))
        .context("Unable to determine config directory for the current platform")
}

/// `config.toml` inside [`config_dir`]
pub fn default_config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
