use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use crate::core::types::{ComponentRecord, DependencyEdge, Direction, TypeDescription};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// An exported org: type catalog, components per type and dependency rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrgSnapshot {
    pub types: Vec<TypeDescription>,
    #[serde(default)]
    pub components: HashMap<String, Vec<ComponentRecord>>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
}

/// Serves an [`OrgSnapshot`] as if it were the remote platform.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: OrgSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: OrgSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let snapshot: OrgSnapshot =
            serde_json::from_str(json).map_err(|e| MetadataError::decode("org snapshot", e))?;
        Ok(Self::new(snapshot))
    }

    pub async fn from_path(path: &Path) -> Result<Self, MetadataError> {
        debug!("Loading org snapshot from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MetadataError::Snapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let snapshot: OrgSnapshot =
            serde_json::from_str(&content).map_err(|e| MetadataError::Snapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        info!(
            "Loaded snapshot {} ({} types, {} dependency rows)",
            path.display(),
            snapshot.types.len(),
            snapshot.dependencies.len()
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &OrgSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl MetadataSource for SnapshotSource {
    async fn describe_types(&self) -> Result<Vec<TypeDescription>, MetadataError> {
        Ok(self.snapshot.types.clone())
    }

    async fn list_components_of_type(
        &self,
        component_type: &str,
    ) -> Result<Vec<ComponentRecord>, MetadataError> {
        Ok(self
            .snapshot
            .components
            .get(component_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn query_dependency_edges(
        &self,
        ids: &[String],
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>, MetadataError> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self
            .snapshot
            .dependencies
            .iter()
            .filter(|edge| wanted.contains(edge.key_id(direction)))
            .cloned()
            .collect())
    }
}
