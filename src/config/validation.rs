//! Configuration validation for metadeps

use super::AppConfig;
use crate::core::errors::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;

static API_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2,}\.\d$").expect("API version pattern is valid"));

/// Reject values that would only fail later, mid-request.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if !API_VERSION.is_match(&config.api_version) {
        return Err(ConfigError::InvalidValue {
            field: "api_version".to_string(),
            value: config.api_version.clone(),
            reason: "expected a version like 61.0".to_string(),
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::InvalidValue {
            field: "server.port".to_string(),
            value: "0".to_string(),
            reason: "port must be non-zero".to_string(),
        });
    }

    if config.server.host.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: "server.host".to_string(),
        });
    }

    if config.source.request_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "source.request_timeout_secs".to_string(),
            value: "0".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    if let Some(url) = &config.source.instance_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "source.instance_url".to_string(),
                value: url.clone(),
                reason: "must be an http(s) URL".to_string(),
            });
        }
    }

    Ok(())
}
