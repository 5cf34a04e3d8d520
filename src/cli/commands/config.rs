use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::cli::args::ConfigAction;
use crate::cli::commands::Command;
use crate::config::{default_config_file, AppConfig};

pub struct ConfigCommand {
    action: ConfigAction,
    path: Option<PathBuf>,
    config: AppConfig,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, path: Option<PathBuf>, config: AppConfig) -> Self {
        Self {
            action,
            path,
            config,
        }
    }

    fn target(&self) -> Result<PathBuf> {
        match &self.path {
            Some(p) => Ok(p.clone()),
            None => default_config_file(),
        }
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        match &self.action {
            ConfigAction::Show => {
                println!("{}", self.config.to_toml()?);
            }

            ConfigAction::Init { force } => {
                let config_path = self.target()?;
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    );
                }
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent).await?;
                }
                let toml_content = AppConfig::default().to_toml()?;
                fs::write(&config_path, toml_content).await?;
                println!("Configuration initialized at {}", config_path.display());
            }
        }

        Ok(())
    }
}
