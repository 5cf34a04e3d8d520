use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::cli::args::DependencyArgs;
use crate::cli::commands::{utils, Command};
use crate::config::AppConfig;
use crate::core::traits::MetadataSource;
use crate::core::types::{Component, Direction};
use crate::core::DependencyResolver;
use crate::export::GraphSerializer;

/// `usage` and `references`, which differ only in direction.
pub struct DependenciesCommand {
    config: AppConfig,
    direction: Direction,
    args: DependencyArgs,
}

impl DependenciesCommand {
    pub fn new(config: AppConfig, direction: Direction, args: DependencyArgs) -> Self {
        Self {
            config,
            direction,
            args,
        }
    }
}

/// Run one dependency query and render it.
pub async fn run_query<S: MetadataSource>(
    resolver: &mut DependencyResolver<S>,
    serializer: &GraphSerializer,
    direction: Direction,
    args: &DependencyArgs,
) -> Result<String> {
    // Edges into types missing from the catalog are dropped, so load it first.
    resolver.describe().await?;

    let id = if args.by_name {
        let component = resolver
            .find_by_name(&args.component_type, &args.id)
            .await?
            .ok_or_else(|| anyhow!("No {} named {}", args.component_type, args.id))?;
        debug!("Resolved {} to {}", args.id, component.id);
        component.id
    } else {
        args.id.clone()
    };

    let components: Vec<Component> = match direction {
        Direction::Backward => {
            resolver
                .usage(&args.component_type, &id, args.recursive)
                .await?
        }
        Direction::Forward => {
            resolver
                .references(&args.component_type, &id, args.recursive)
                .await?
        }
    };

    Ok(serializer.render(&components, args.format)?.body)
}

#[async_trait]
impl Command for DependenciesCommand {
    async fn execute(&self) -> Result<()> {
        let mut resolver = utils::open_resolver(&self.config).await?;
        let serializer = GraphSerializer::new(self.config.api_version.as_str());
        let body = run_query(&mut resolver, &serializer, self.direction, &self.args).await?;
        utils::write_output(&body, self.args.output.as_deref()).await
    }
}
