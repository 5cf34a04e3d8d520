//! Serialization of resolved dependency graphs
pub mod graph_serializer;

pub use graph_serializer::{GraphSerializer, Rendered, METADATA_NAMESPACE};
