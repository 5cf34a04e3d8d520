//! Component directory and type catalog.
//!
//! Both are filled lazily from the [`MetadataSource`] and never invalidated, so a
//! rename on the remote side during a run is not observed.

use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use crate::core::types::Component;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Components of one type, keyed by id and iterated in full-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap {
    ordered: Vec<Component>,
    by_id: HashMap<String, usize>,
}

impl ComponentMap {
    fn from_sorted(ordered: Vec<Component>) -> Self {
        let mut by_id = HashMap::with_capacity(ordered.len());
        for (idx, component) in ordered.iter().enumerate() {
            // later duplicates win, matching a plain id-keyed map
            by_id.insert(component.id.clone(), idx);
        }
        Self { ordered, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.by_id.get(id).map(|&idx| &self.ordered[idx])
    }

    pub fn find_by_name(&self, full_name: &str) -> Option<&Component> {
        self.ordered.iter().find(|c| c.full_name == full_name)
    }

    pub fn values(&self) -> impl Iterator<Item = &Component> {
        self.ordered
            .iter()
            .enumerate()
            .filter(|(idx, c)| self.by_id.get(&c.id) == Some(idx))
            .map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Per-process cache of the type catalog and of every listed type.
pub struct ComponentDirectory<S> {
    source: S,
    catalog: Option<Vec<String>>,
    known_types: HashSet<String>,
    components: HashMap<String, ComponentMap>,
}

impl<S: MetadataSource> ComponentDirectory<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: None,
            known_types: HashSet::new(),
            components: HashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sorted type catalog with child types flattened in. Fetched once.
    pub async fn list_types(&mut self) -> Result<&[String], MetadataError> {
        if self.catalog.is_none() {
            let descriptions = self.source.describe_types().await?;
            let mut names: Vec<String> = descriptions
                .into_iter()
                .flat_map(|d| std::iter::once(d.name).chain(d.child_names))
                .collect();
            names.sort();
            self.known_types.extend(names.iter().cloned());
            debug!("Type catalog loaded with {} names", names.len());
            self.catalog = Some(names);
        }

        Ok(self.catalog.as_deref().unwrap_or_default())
    }

    /// Whether edges pointing at `component_type` are kept.
    ///
    /// Only names registered by [`list_types`](Self::list_types) count; before the
    /// catalog is loaded every type is unknown.
    pub fn is_known_type(&self, component_type: &str) -> bool {
        self.known_types.contains(component_type)
    }

    pub fn is_loaded(&self, component_type: &str) -> bool {
        self.components.contains_key(component_type)
    }

    /// All components of `component_type`, fetched on first use.
    pub async fn list_components(
        &mut self,
        component_type: &str,
    ) -> Result<&ComponentMap, MetadataError> {
        if !self.components.contains_key(component_type) {
            let records = self.source.list_components_of_type(component_type).await?;
            let mut ordered: Vec<Component> = records
                .into_iter()
                .map(|r| Component::new(r.id, component_type, r.full_name))
                .collect();
            ordered.sort_by(|a, b| a.full_name.cmp(&b.full_name));
            debug!(
                "Loaded {} components of type {}",
                ordered.len(),
                component_type
            );
            let map = ComponentMap::from_sorted(ordered);
            self.components.insert(component_type.to_string(), map);
        }

        Ok(&self.components[component_type])
    }

    /// Look up one component, loading its type if needed.
    pub async fn component(
        &mut self,
        component_type: &str,
        id: &str,
    ) -> Result<Option<Component>, MetadataError> {
        Ok(self.list_components(component_type).await?.get(id).cloned())
    }

    /// Look up a component in an already loaded type.
    pub fn cached_component(&self, component_type: &str, id: &str) -> Option<&Component> {
        self.components.get(component_type)?.get(id)
    }
}
