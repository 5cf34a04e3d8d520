use anyhow::{Context, Result};
use async_trait::async_trait;
use std::net::SocketAddr;

use crate::cli::commands::{utils, Command};
use crate::config::AppConfig;
use crate::export::GraphSerializer;
use crate::server::{self, AppState};

pub struct ServeCommand {
    config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
}

impl ServeCommand {
    pub fn new(config: AppConfig, host: Option<String>, port: Option<u16>) -> Self {
        Self { config, host, port }
    }

    async fn bind_address(&self) -> Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(&self.config.server.host);
        let port = self.port.unwrap_or(self.config.server.port);
        tokio::net::lookup_host((host, port))
            .await
            .with_context(|| format!("Cannot resolve {}:{}", host, port))?
            .next()
            .with_context(|| format!("No address for {}:{}", host, port))
    }
}

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> Result<()> {
        let addr = self.bind_address().await?;
        let resolver = utils::open_resolver(&self.config).await?;
        let state = AppState::new(
            resolver,
            GraphSerializer::new(self.config.api_version.as_str()),
        );
        server::serve(state, addr).await
    }
}
