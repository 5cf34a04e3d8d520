use anyhow::Result;
use async_trait::async_trait;

pub mod config;
pub mod dependencies;
pub mod describe;
pub mod list;
pub mod serve;

/// Trait for CLI command implementations
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command with the given arguments
    async fn execute(&self) -> Result<()>;
}

/// Common utilities for command implementations
pub mod utils {
    use crate::config::AppConfig;
    use crate::server::DynResolver;
    use crate::source::open_source;
    use anyhow::{Context, Result};
    use std::path::Path;
    use tokio::fs;
    use tokio::io::AsyncWriteExt;

    /// Build a resolver over whichever source the configuration selects
    pub async fn open_resolver(config: &AppConfig) -> Result<DynResolver> {
        let selection = config.source_selection()?;
        let source = open_source(&selection, &config.api_version)
            .await
            .context("Failed to open metadata source")?;
        Ok(DynResolver::new(source))
    }

    /// Write to `output`, or stdout when absent
    pub async fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                fs::write(path, content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Output written to {}", path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(content.as_bytes()).await?;
                if !content.ends_with('\n') {
                    stdout.write_all(b"\n").await?;
                }
                stdout.flush().await?;
            }
        }
        Ok(())
    }

}
