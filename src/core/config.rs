//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::{ExportError, Result};

/// Default POEditor export endpoint
pub const DEFAULT_API_URL: &str = "https://api.poeditor.com/v2/projects/export";

/// Configuration for the exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout; `None` keeps the HTTP client default
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: None,
        }
    }
}

impl ExporterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("POEDITOR_API_URL").unwrap_or_else(|_| default_api_url());

        let timeout_ms = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(value) => Some(value.parse::<u64>().map_err(|e| ExportError::ConfigError {
                message: format!("REQUEST_TIMEOUT_MS must be an integer: {}", e),
            })?),
            Err(_) => None,
        };

        debug!("Using export endpoint {}", api_url);

        Ok(Self {
            api_url,
            timeout_ms,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(ExportError::ConfigError {
                message: "API URL is required".to_string(),
            });
        }

        reqwest::Url::parse(&self.api_url).map_err(|e| ExportError::ConfigError {
            message: format!("invalid API URL {}: {}", self.api_url, e),
        })?;

        if self.timeout_ms == Some(0) {
            return Err(ExportError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
