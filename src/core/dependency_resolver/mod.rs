pub mod cache;
pub mod fetcher;

pub use cache::{CacheStats, ComponentSet, ResolutionCache, ResolutionCaches};
pub use fetcher::dependencies;

use crate::core::directory::ComponentDirectory;
use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use crate::core::types::{Component, Depth, Direction};
use tracing::info;

/// Answers "who uses this component" and "what does it reference".
///
/// One resolver per metadata source. It owns the directory and the four
/// resolution caches, all of which live as long as the resolver does.
/// [`describe`](Self::describe) must run once before resolving, otherwise every
/// edge is filtered out as pointing at an unknown type.
pub struct DependencyResolver<S> {
    directory: ComponentDirectory<S>,
    caches: ResolutionCaches,
}

impl<S: MetadataSource> DependencyResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            directory: ComponentDirectory::new(source),
            caches: ResolutionCaches::new(),
        }
    }

    /// Sorted type catalog
    pub async fn describe(&mut self) -> Result<Vec<String>, MetadataError> {
        Ok(self.directory.list_types().await?.to_vec())
    }

    /// Components of one type in full-name order
    pub async fn list(&mut self, component_type: &str) -> Result<Vec<Component>, MetadataError> {
        Ok(self
            .directory
            .list_components(component_type)
            .await?
            .values()
            .cloned()
            .collect())
    }

    pub async fn find_by_name(
        &mut self,
        component_type: &str,
        full_name: &str,
    ) -> Result<Option<Component>, MetadataError> {
        Ok(self
            .directory
            .list_components(component_type)
            .await?
            .find_by_name(full_name)
            .cloned())
    }

    /// Components that depend on `id`.
    ///
    /// With `recursive`, the seed component itself comes first so callers can
    /// tell it apart from its dependents.
    pub async fn usage(
        &mut self,
        component_type: &str,
        id: &str,
        recursive: bool,
    ) -> Result<Vec<Component>, MetadataError> {
        self.resolve(
            Direction::Backward,
            component_type,
            id,
            recursive,
            recursive,
        )
        .await
    }

    /// Components `id` depends on. The seed is never included up front.
    pub async fn references(
        &mut self,
        component_type: &str,
        id: &str,
        recursive: bool,
    ) -> Result<Vec<Component>, MetadataError> {
        self.resolve(Direction::Forward, component_type, id, recursive, false)
            .await
    }

    async fn resolve(
        &mut self,
        direction: Direction,
        component_type: &str,
        id: &str,
        recursive: bool,
        with_seed: bool,
    ) -> Result<Vec<Component>, MetadataError> {
        let depth = Depth::from_recursive(recursive);
        let cache = self.caches.get_mut(direction, depth);
        let found = dependencies(
            &mut self.directory,
            &[id.to_string()],
            cache,
            direction,
            depth.is_recursive(),
        )
        .await?;

        info!(
            "{} of {} {} ({:?}): {} components",
            direction,
            component_type,
            id,
            depth,
            found.len()
        );

        if !with_seed {
            return Ok(found.into_vec());
        }

        let mut result = Vec::with_capacity(found.len() + 1);
        if let Some(seed) = self.directory.component(component_type, id).await? {
            result.push(seed);
        }
        result.extend(found.into_iter().filter(|c| c.id != id));
        Ok(result)
    }

    pub fn directory(&self) -> &ComponentDirectory<S> {
        &self.directory
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.caches.stats()
    }
}
