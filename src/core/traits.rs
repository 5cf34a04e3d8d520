use crate::core::errors::MetadataError;
use crate::core::types::{ComponentRecord, DependencyEdge, Direction, TypeDescription};
use async_trait::async_trait;

/// Remote capabilities the resolver consumes.
///
/// Every call is a single round trip; implementations do no caching of their
/// own, the directory and resolver own all caches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Full type catalog, parent types with their child type names
    async fn describe_types(&self) -> Result<Vec<TypeDescription>, MetadataError>;

    /// Every component of one type
    async fn list_components_of_type(
        &self,
        component_type: &str,
    ) -> Result<Vec<ComponentRecord>, MetadataError>;

    /// Relation-table rows whose key column (per `direction`) is one of `ids`
    async fn query_dependency_edges(
        &self,
        ids: &[String],
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>, MetadataError>;
}

#[async_trait]
impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    async fn describe_types(&self) -> Result<Vec<TypeDescription>, MetadataError> {
        (**self).describe_types().await
    }

    async fn list_components_of_type(
        &self,
        component_type: &str,
    ) -> Result<Vec<ComponentRecord>, MetadataError> {
        (**self).list_components_of_type(component_type).await
    }

    async fn query_dependency_edges(
        &self,
        ids: &[String],
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>, MetadataError> {
        (**self).query_dependency_edges(ids, direction).await
    }
}
