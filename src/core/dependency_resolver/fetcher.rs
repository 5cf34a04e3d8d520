use crate::core::dependency_resolver::cache::{ComponentSet, ResolutionCache};
use crate::core::directory::ComponentDirectory;
use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use crate::core::types::{DependencyEdge, Direction};
use std::collections::HashSet;
use tracing::debug;

/// Resolve the components adjacent to `ids` in `direction`.
///
/// Cached ids are answered from `cache`. Uncached ids are fetched together in
/// one relation-table query per pass, after an empty entry has been reserved for
/// each of them. With `recursive`, components discovered in a pass become the
/// next pass's batch until a pass discovers nothing new.
///
/// If a pass fails, the entries reserved for that pass are dropped again so a
/// later call re-queries them. Entries written by completed passes stay.
pub async fn dependencies<S: MetadataSource>(
    directory: &mut ComponentDirectory<S>,
    ids: &[String],
    cache: &mut ResolutionCache,
    direction: Direction,
    recursive: bool,
) -> Result<ComponentSet, MetadataError> {
    let mut result = ComponentSet::new();
    let mut frontier: Vec<String> = ids.to_vec();
    let mut pass = 0usize;

    while !frontier.is_empty() {
        pass += 1;
        let mut discovered = Vec::new();
        let mut pending = Vec::new();

        for id in &frontier {
            match cache.get(id) {
                Some(adjacent) => {
                    for component in adjacent.iter() {
                        if result.insert(component.clone()) {
                            discovered.push(component.id.clone());
                        }
                    }
                }
                None => {
                    cache.reserve(id);
                    pending.push(id.clone());
                }
            }
        }

        if !pending.is_empty() {
            debug!(
                "{} pass {}: querying edges for {} ids",
                direction,
                pass,
                pending.len()
            );
            let edges = match fetch_pass(directory, &pending, direction).await {
                Ok(edges) => edges,
                Err(e) => {
                    for id in &pending {
                        cache.remove(id);
                    }
                    return Err(e);
                }
            };

            for edge in &edges {
                let (target_id, target_type) = edge.far_end(direction);
                if !directory.is_known_type(target_type) {
                    debug!("Dropping edge to unknown type {}", target_type);
                    continue;
                }
                let Some(component) = directory
                    .cached_component(target_type, target_id)
                    .cloned()
                else {
                    continue;
                };

                cache.insert_adjacent(edge.key_id(direction), component.clone());
                let id = component.id.clone();
                if result.insert(component) {
                    discovered.push(id);
                }
            }
        }

        if !recursive {
            break;
        }
        frontier = discovered;
    }

    debug!(
        "{} resolved {} components in {} passes",
        direction,
        result.len(),
        pass
    );
    Ok(result)
}

/// One batched edge query plus the type listings its targets need.
async fn fetch_pass<S: MetadataSource>(
    directory: &mut ComponentDirectory<S>,
    pending: &[String],
    direction: Direction,
) -> Result<Vec<DependencyEdge>, MetadataError> {
    let edges = directory
        .source()
        .query_dependency_edges(pending, direction)
        .await?;
    preload_target_types(directory, &edges, direction).await?;
    Ok(edges)
}

/// Load every distinct known target type of a batch once, before resolving edges.
async fn preload_target_types<S: MetadataSource>(
    directory: &mut ComponentDirectory<S>,
    edges: &[DependencyEdge],
    direction: Direction,
) -> Result<(), MetadataError> {
    let mut seen = HashSet::new();
    let mut to_load = Vec::new();
    for edge in edges {
        let (_, target_type) = edge.far_end(direction);
        if directory.is_known_type(target_type)
            && !directory.is_loaded(target_type)
            && seen.insert(target_type)
        {
            to_load.push(target_type);
        }
    }

    for component_type in to_load {
        directory.list_components(component_type).await?;
    }
    Ok(())
}
