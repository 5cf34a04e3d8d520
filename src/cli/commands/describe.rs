use anyhow::Result;
use async_trait::async_trait;

use crate::cli::commands::{utils, Command};
use crate::config::AppConfig;

pub struct DescribeCommand {
    config: AppConfig,
}

impl DescribeCommand {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for DescribeCommand {
    async fn execute(&self) -> Result<()> {
        let mut resolver = utils::open_resolver(&self.config).await?;
        let types = resolver.describe().await?;
        utils::write_output(&types.join("\n"), None).await
    }
}
