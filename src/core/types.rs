use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::MetadataError;

/// A named, typed configuration object in the remote org.
///
/// `id` uniquely determines `(component_type, full_name)` for as long as the
/// directory cache lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        component_type: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            full_name: full_name.into(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component_type, self.full_name)
    }
}

/// One entry of the remote type catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescription {
    pub name: String,
    #[serde(default)]
    pub child_names: Vec<String>,
}

/// A component as listed by the remote platform, before its type is attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: String,
    pub full_name: String,
}

/// One row of the relation table: `source` depends on `target`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source_id: String,
    pub source_type: String,
    pub target_id: String,
    pub target_type: String,
}

impl DependencyEdge {
    /// The endpoint the row was queried by.
    pub fn key_id(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.source_id,
            Direction::Backward => &self.target_id,
        }
    }

    /// The endpoint that gets resolved into a [`Component`], as `(id, type)`.
    pub fn far_end(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::Forward => (&self.target_id, &self.target_type),
            Direction::Backward => (&self.source_id, &self.source_type),
        }
    }
}

/// Which way an edge is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// "What does X reference"
    Forward,
    /// "What references X"
    Backward,
}

impl Direction {
    /// Relation-table column the batch of ids is matched against.
    pub fn key_column(self) -> &'static str {
        match self {
            Direction::Forward => "MetadataComponentId",
            Direction::Backward => "RefMetadataComponentId",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "references"),
            Direction::Backward => write!(f, "usage"),
        }
    }
}

/// One hop or full transitive closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    Direct,
    Transitive,
}

impl Depth {
    pub fn from_recursive(recursive: bool) -> Self {
        if recursive {
            Depth::Transitive
        } else {
            Depth::Direct
        }
    }

    pub fn is_recursive(self) -> bool {
        matches!(self, Depth::Transitive)
    }
}

/// Output formats understood by the graph serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    /// package.xml manifest
    #[value(alias = "xml")]
    Package,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Package => "text/xml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "package" | "xml" => Ok(OutputFormat::Package),
            _ => Err(MetadataError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}
