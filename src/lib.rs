//! # metadeps
//!
//! Explore the dependency graph of an org's metadata: which components use a
//! given component, which components it references, transitively or not, and
//! render the answer as JSON, CSV or a deployable `package.xml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use metadeps::{DependencyResolver, GraphSerializer, OutputFormat, SnapshotSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SnapshotSource::from_json(r#"{
//!     "types": [{"name": "ApexClass"}],
//!     "components": {"ApexClass": [
//!         {"id": "a", "fullName": "A"}, {"id": "b", "fullName": "B"}
//!     ]},
//!     "dependencies": [
//!         {"sourceId": "a", "sourceType": "ApexClass", "targetId": "b", "targetType": "ApexClass"}
//!     ]
//! }"#)?;
//!
//! let mut resolver = DependencyResolver::new(source);
//! resolver.describe().await?;
//! let used_by = resolver.usage("ApexClass", "b", true).await?;
//! let csv = GraphSerializer::new("61.0").render(&used_by, OutputFormat::Csv)?;
//! assert_eq!(csv.body, "fullName,type\nB,ApexClass\nA,ApexClass\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`core`] - Types, the component directory and the dependency resolver
//! - [`source`] - Metadata sources: offline snapshots and live orgs
//! - [`export`] - JSON, CSV and package.xml rendering
//! - [`server`] - HTTP API
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration loading and validation

/// Command-line interface and argument parsing
pub mod cli;
/// Configuration management and validation
pub mod config;
/// Core types, directory and dependency resolution
pub mod core;
/// Output rendering
pub mod export;
/// HTTP API over a shared resolver
pub mod server;
/// Metadata sources
pub mod source;

pub use crate::config::AppConfig;
pub use crate::core::{
    Component, ConfigError, DependencyResolver, Direction, MetadataError, MetadataSource,
    OutputFormat,
};
pub use crate::export::GraphSerializer;
pub use crate::source::SnapshotSource;
