//! Configuration for metadeps
//!
//! Values are layered: built-in defaults, then the TOML file, then `METADEPS_*`
//! environment variables, then CLI flags. The access token is only ever read
//! from the environment and is never serialized.

pub mod paths;
pub mod validation;

pub use paths::{config_dir, default_config_file};
pub use validation::validate_config;

use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const ENV_PREFIX: &str = "METADEPS_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// API version used for remote calls and written into package manifests
    pub api_version: String,
    pub server: ServerConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Offline org snapshot (JSON)
    pub snapshot: Option<PathBuf>,
    /// Live org, e.g. `https://example.my.salesforce.com`
    pub instance_url: Option<String>,
    pub request_timeout_secs: u64,
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("snapshot", &self.snapshot)
            .field("instance_url", &self.instance_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Which metadata source a run should use.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSelection {
    Snapshot(PathBuf),
    Remote {
        instance_url: String,
        access_token: String,
        timeout: Duration,
    },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_version: "61.0".to_string(),
            server: ServerConfig::default(),
            source: SourceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            instance_url: None,
            request_timeout_secs: 120,
            access_token: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist; a missing default file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (file, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_file() {
                Ok(p) => (p, false),
                Err(e) => {
                    debug!("No default config location: {}", e);
                    return Self::finish(Self::default());
                }
            },
        };

        let config = if file.exists() {
            let content =
                std::fs::read_to_string(&file).map_err(|_| ConfigError::FileNotFound {
                    path: file.clone(),
                })?;
            let config = Self::from_toml_str(&content)?;
            info!("Loaded config from {}", file.display());
            config
        } else if explicit {
            return Err(ConfigError::FileNotFound { path: file });
        } else {
            debug!("No config file at {}, using defaults", file.display());
            Self::default()
        };

        Self::finish(config)
    }

    fn finish(config: Self) -> Result<Self, ConfigError> {
        let config = config.apply_env_overrides();
        validate_config(&config)?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationFailed {
            reason: format!("Failed to serialize config: {e}"),
        })
    }

    /// Apply `METADEPS_*` environment variables on top of this config
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var(format!("{ENV_PREFIX}API_VERSION")) {
            debug!("Applied env override: api_version = {}", val);
            self.api_version = val;
        }

        if let Ok(val) = env::var(format!("{ENV_PREFIX}HOST")) {
            debug!("Applied env override: server.host = {}", val);
            self.server.host = val;
        }

        if let Ok(val) = env::var(format!("{ENV_PREFIX}PORT")) {
            match val.parse::<u16>() {
                Ok(port) => {
                    self.server.port = port;
                    debug!("Applied env override: server.port = {}", port);
                }
                Err(e) => warn!("Ignoring {ENV_PREFIX}PORT={}: {}", val, e),
            }
        }

        if let Ok(val) = env::var(format!("{ENV_PREFIX}SNAPSHOT")) {
            debug!("Applied env override: source.snapshot = {}", val);
            self.source.snapshot = Some(PathBuf::from(val));
        }

        if let Ok(val) = env::var(format!("{ENV_PREFIX}INSTANCE_URL")) {
            debug!("Applied env override: source.instance_url = {}", val);
            self.source.instance_url = Some(val);
        }

        if let Ok(val) = env::var(format!("{ENV_PREFIX}ACCESS_TOKEN")) {
            self.source.access_token = Some(val);
        }

        self
    }

    /// Decide which source to use. A snapshot wins over a live org.
    pub fn source_selection(&self) -> Result<SourceSelection, ConfigError> {
        let source = &self.source;
        if let Some(snapshot) = &source.snapshot {
            if source.instance_url.is_some() {
                warn!("Both a snapshot and an instance URL are configured; using the snapshot");
            }
            return Ok(SourceSelection::Snapshot(snapshot.clone()));
        }

        let instance_url = source
            .instance_url
            .clone()
            .ok_or_else(|| ConfigError::MissingField {
                field: "source.snapshot or source.instance_url".to_string(),
            })?;
        let access_token = source
            .access_token
            .clone()
            .ok_or_else(|| ConfigError::MissingField {
                field: format!("{ENV_PREFIX}ACCESS_TOKEN"),
            })?;

        Ok(SourceSelection::Remote {
            instance_url,
            access_token,
            timeout: Duration::from_secs(source.request_timeout_secs),
        })
    }
}
