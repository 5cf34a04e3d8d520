pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, DependencyArgs};

use crate::cli::commands::{
    config::ConfigCommand, dependencies::DependenciesCommand, describe::DescribeCommand,
    list::ListCommand, serve::ServeCommand, Command,
};
use crate::config::AppConfig;
use crate::core::types::Direction;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Main entry point for the CLI application
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    let command: Box<dyn Command> = match cli.command {
        Commands::Describe => Box::new(DescribeCommand::new(config)),
        Commands::List { component_type } => Box::new(ListCommand::new(config, component_type)),
        Commands::Usage(args) => {
            Box::new(DependenciesCommand::new(config, Direction::Backward, args))
        }
        Commands::References(args) => {
            Box::new(DependenciesCommand::new(config, Direction::Forward, args))
        }
        Commands::Serve { host, port } => Box::new(ServeCommand::new(config, host, port)),
        Commands::Config { action } => Box::new(ConfigCommand::new(action, cli.config, config)),
    };

    command.execute().await
}

/// Logs go to stderr so rendered output on stdout stays clean.
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metadeps={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    // `config init` may target a file that does not exist yet.
    let path = match &cli.command {
        Commands::Config {
            action: ConfigAction::Init { .. },
        } => None,
        _ => cli.config.as_deref(),
    };

    let mut config = AppConfig::load(path).context("Failed to load configuration")?;
    if let Some(snapshot) = &cli.snapshot {
        config.source.snapshot = Some(snapshot.clone());
    }
    Ok(config)
}
