pub mod dependency_resolver;
pub mod directory;
pub mod errors;
pub mod traits;
pub mod types;

pub use dependency_resolver::{
    dependencies, CacheStats, ComponentSet, DependencyResolver, ResolutionCache, ResolutionCaches,
};
pub use directory::{ComponentDirectory, ComponentMap};
pub use errors::{ConfigError, MetadataError};
pub use traits::*;
pub use types::*;
