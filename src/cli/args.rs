use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::OutputFormat;

/// Command line interface for metadeps, a dependency explorer for org metadata.
///
/// # Examples
///
/// ```bash
/// # Everything that uses a custom field, transitively, as package.xml
/// metadeps usage CustomField 00N5g00000AbCdE --recursive --format package
///
/// # What an Apex class references, from an offline snapshot
/// metadeps --snapshot org.json references ApexClass AccountService --by-name
///
/// # Serve the HTTP API
/// metadeps serve --port 3000
/// ```
#[derive(Parser, Debug)]
#[command(name = "metadeps")]
#[command(about = "Explore metadata dependencies: usage, references and package manifests")]
#[command(version)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read the org from a snapshot file instead of a live instance
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the type catalog, one type per line
    Describe,

    /// List components of a type
    List {
        /// Component type, e.g. ApexClass
        component_type: String,
    },

    /// What depends on a component
    Usage(DependencyArgs),

    /// What a component depends on
    References(DependencyArgs),

    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DependencyArgs {
    /// Component type of the starting component
    pub component_type: String,

    /// Component id (or full name with --by-name)
    pub id: String,

    /// Follow dependencies transitively
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat the id argument as a full name
    #[arg(long)]
    pub by_name: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
