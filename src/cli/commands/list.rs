use anyhow::Result;
use async_trait::async_trait;

use crate::cli::commands::{utils, Command};
use crate::config::AppConfig;
use crate::core::types::Component;

pub struct ListCommand {
    config: AppConfig,
    component_type: String,
}

impl ListCommand {
    pub fn new(config: AppConfig, component_type: String) -> Self {
        Self {
            config,
            component_type,
        }
    }
}

/// `fullName<TAB>id`, one component per line
pub fn format_listing(components: &[Component]) -> String {
    components
        .iter()
        .map(|c| format!("{}\t{}", c.full_name, c.id))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self) -> Result<()> {
        let mut resolver = utils::open_resolver(&self.config).await?;
        let components = resolver.list(&self.component_type).await?;
        if components.is_empty() {
            tracing::warn!("No components of type {}", self.component_type);
        }
        utils::write_output(&format_listing(&components), None).await
    }
}
