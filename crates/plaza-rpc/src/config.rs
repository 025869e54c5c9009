//! Client configuration
//!
//! Loaded from a TOML file or built in code. The endpoint and API key are
//! required; everything else has a default matching the hosted provider's
//! observed behavior (notably: no request timeout unless one is configured).

use plaza_core::{PlazaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page sizes the grid offers
pub const DEFAULT_PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

/// RPC client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Base endpoint URL of the hosted provider
    pub endpoint: String,
    /// API key sent with every request
    pub api_key: String,
    /// Optional request timeout in seconds. None leaves requests unbounded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Page size options offered by the grid
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
}

fn default_page_sizes() -> Vec<usize> {
    DEFAULT_PAGE_SIZES.to_vec()
}

impl RpcConfig {
    /// Create a configuration with defaults
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout_secs: None,
            page_sizes: default_page_sizes(),
        }
    }

    /// Set a request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Timeout as a `Duration`, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            PlazaError::Configuration(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Default config file location (`<config dir>/plaza/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("plaza").join("config.toml"))
    }
}
