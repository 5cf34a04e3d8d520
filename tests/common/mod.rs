//! Shared fixtures: org snapshots and a source that counts remote calls.

use async_trait::async_trait;
use metadeps::core::{ComponentRecord, DependencyEdge, Direction, TypeDescription};
use metadeps::source::OrgSnapshot;
use metadeps::{MetadataError, MetadataSource, SnapshotSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Wraps a [`SnapshotSource`] and records every call made through it.
#[derive(Clone)]
pub struct CountingSource {
    inner: Arc<SnapshotSource>,
    pub describe_calls: Arc<AtomicUsize>,
    pub list_calls: Arc<AtomicUsize>,
    pub edge_batches: Arc<Mutex<Vec<Vec<String>>>>,
}

impl CountingSource {
    pub fn new(snapshot: OrgSnapshot) -> Self {
        Self {
            inner: Arc::new(SnapshotSource::new(snapshot)),
            describe_calls: Arc::new(AtomicUsize::new(0)),
            list_calls: Arc::new(AtomicUsize::new(0)),
            edge_batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn describes(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.edge_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSource for CountingSource {
    async fn describe_types(&self) -> Result<Vec<TypeDescription>, MetadataError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.describe_types().await
    }

    async fn list_components_of_type(
        &self,
        component_type: &str,
    ) -> Result<Vec<ComponentRecord>, MetadataError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_components_of_type(component_type).await
    }

    async fn query_dependency_edges(
        &self,
        ids: &[String],
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>, MetadataError> {
        let mut batch = ids.to_vec();
        batch.sort();
        self.edge_batches.lock().unwrap().push(batch);
        self.inner.query_dependency_edges(ids, direction).await
    }
}

/// Builds snapshots edge by edge.
#[derive(Default)]
pub struct SnapshotBuilder {
    types: Vec<TypeDescription>,
    components: HashMap<String, Vec<ComponentRecord>>,
    dependencies: Vec<DependencyEdge>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: &str) -> Self {
        self.types.push(TypeDescription {
            name: name.to_string(),
            child_names: Vec::new(),
        });
        self
    }

    pub fn with_component(mut self, component_type: &str, id: &str, full_name: &str) -> Self {
        self.components
            .entry(component_type.to_string())
            .or_default()
            .push(ComponentRecord {
                id: id.to_string(),
                full_name: full_name.to_string(),
            });
        self
    }

    /// `source` depends on `target`
    pub fn with_edge(mut self, source: (&str, &str), target: (&str, &str)) -> Self {
        self.dependencies.push(DependencyEdge {
            source_type: source.0.to_string(),
            source_id: source.1.to_string(),
            target_type: target.0.to_string(),
            target_id: target.1.to_string(),
        });
        self
    }

    pub fn build(self) -> OrgSnapshot {
        OrgSnapshot {
            types: self.types,
            components: self.components,
            dependencies: self.dependencies,
        }
    }
}

/// A -> B -> C, all Apex classes.
pub fn chain() -> OrgSnapshot {
    SnapshotBuilder::new()
        .with_type("ApexClass")
        .with_component("ApexClass", "A", "Alpha")
        .with_component("ApexClass", "B", "Bravo")
        .with_component("ApexClass", "C", "Charlie")
        .with_edge(("ApexClass", "A"), ("ApexClass", "B"))
        .with_edge(("ApexClass", "B"), ("ApexClass", "C"))
        .build()
}

/// A -> B -> A
pub fn cycle() -> OrgSnapshot {
    SnapshotBuilder::new()
        .with_type("ApexClass")
        .with_component("ApexClass", "A", "Alpha")
        .with_component("ApexClass", "B", "Bravo")
        .with_edge(("ApexClass", "A"), ("ApexClass", "B"))
        .with_edge(("ApexClass", "B"), ("ApexClass", "A"))
        .build()
}

/// A page, two classes it uses, a field both classes read and an edge into
/// a type missing from the catalog.
pub fn mixed_org() -> OrgSnapshot {
    SnapshotBuilder::new()
        .with_type("ApexClass")
        .with_type("ApexPage")
        .with_type("CustomField")
        .with_component("ApexPage", "P", "AccountOverview")
        .with_component("ApexClass", "A1", "AccountController")
        .with_component("ApexClass", "A2", "AccountHelper")
        .with_component("CustomField", "F", "Account.Region__c")
        .with_edge(("ApexPage", "P"), ("ApexClass", "A1"))
        .with_edge(("ApexPage", "P"), ("ApexClass", "A2"))
        .with_edge(("ApexClass", "A1"), ("CustomField", "F"))
        .with_edge(("ApexClass", "A2"), ("CustomField", "F"))
        .with_edge(("ApexClass", "A1"), ("StandardEntity", "S"))
        .build()
}

pub fn ids(components: &[metadeps::Component]) -> Vec<&str> {
    components.iter().map(|c| c.id.as_str()).collect()
}
