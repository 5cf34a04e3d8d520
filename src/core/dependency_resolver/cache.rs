use crate::core::types::{Component, Depth, Direction};
use std::collections::{HashMap, HashSet};

/// Insertion-ordered set of components, keyed by component id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentSet {
    items: Vec<Component>,
    ids: HashSet<String>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the component was not present yet.
    pub fn insert(&mut self, component: Component) -> bool {
        if self.ids.contains(&component.id) {
            return false;
        }
        self.ids.insert(component.id.clone());
        self.items.push(component);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Component> {
        self.items
    }
}

impl IntoIterator for ComponentSet {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Adjacency sets for one `(direction, depth)` combination.
///
/// A key, once present, is never invalidated. An empty set means "fetched, no
/// edges", which is different from an absent key.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    adjacency: HashMap<String, ComponentSet>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ComponentSet> {
        self.adjacency.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Reserve an empty entry for an id about to be fetched.
    pub fn reserve(&mut self, id: &str) {
        self.adjacency.entry(id.to_string()).or_default();
    }

    /// Forget an id whose fetch did not complete.
    pub fn remove(&mut self, id: &str) -> Option<ComponentSet> {
        self.adjacency.remove(id)
    }

    pub fn insert_adjacent(&mut self, id: &str, component: Component) {
        self.adjacency
            .entry(id.to_string())
            .or_default()
            .insert(component);
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// The four independent caches owned by one resolver.
#[derive(Debug, Default)]
pub struct ResolutionCaches {
    forward_direct: ResolutionCache,
    forward_transitive: ResolutionCache,
    backward_direct: ResolutionCache,
    backward_transitive: ResolutionCache,
}

impl ResolutionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, direction: Direction, depth: Depth) -> &ResolutionCache {
        match (direction, depth) {
            (Direction::Forward, Depth::Direct) => &self.forward_direct,
            (Direction::Forward, Depth::Transitive) => &self.forward_transitive,
            (Direction::Backward, Depth::Direct) => &self.backward_direct,
            (Direction::Backward, Depth::Transitive) => &self.backward_transitive,
        }
    }

    pub fn get_mut(&mut self, direction: Direction, depth: Depth) -> &mut ResolutionCache {
        match (direction, depth) {
            (Direction::Forward, Depth::Direct) => &mut self.forward_direct,
            (Direction::Forward, Depth::Transitive) => &mut self.forward_transitive,
            (Direction::Backward, Depth::Direct) => &mut self.backward_direct,
            (Direction::Backward, Depth::Transitive) => &mut self.backward_transitive,
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            forward_direct: self.forward_direct.len(),
            forward_transitive: self.forward_transitive.len(),
            backward_direct: self.backward_direct.len(),
            backward_transitive: self.backward_transitive.len(),
        }
    }
}

/// Number of cached ids per cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CacheStats {
    pub forward_direct: usize,
    pub forward_transitive: usize,
    pub backward_direct: usize,
    pub backward_transitive: usize,
}
