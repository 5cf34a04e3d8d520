/// Domain error types for metadeps using thiserror
///
/// Remote failures are carried through the directory, fetcher and resolver
/// unchanged so the shell can report them as-is.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while describing, listing or resolving metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Remote call {operation} failed: {message}")]
    Remote {
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("Snapshot {path} could not be loaded: {reason}")]
    Snapshot { path: PathBuf, reason: String },

    #[error("Output format not supported: {format}")]
    UnsupportedFormat { format: String },

    #[error("Rendering {format} failed: {reason}")]
    Render { format: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },
}

impl MetadataError {
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        MetadataError::Remote {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn remote_with_source<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MetadataError::Remote {
            operation: operation.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        MetadataError::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn render(format: impl Into<String>, reason: impl ToString) -> Self {
        MetadataError::Render {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error came from the remote side rather than from local input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            MetadataError::Remote { .. } | MetadataError::Decode { .. }
        )
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::decode("JSON", err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ValidationFailed {
            reason: format!("TOML error: {}", err),
        }
    }
}
