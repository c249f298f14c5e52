//! Configuration System
//!
//! Serde-backed configuration with defaults suitable for local development.
//! Values are loaded from an optional TOML file (XDG config directory or an
//! explicit path) with `HOSTFACET_*` environment variable overrides layered
//! on top.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Query shaping settings
    #[serde(default)]
    pub queries: QueriesConfig,

    /// Query execution service endpoint settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            queries: QueriesConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Query shaping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueriesConfig {
    /// Name of the host documents index
    #[serde(default = "default_hosts_index")]
    pub hosts_index: String,

    /// Aggregation bucket count cap; buckets beyond this are never visible
    #[serde(default = "default_max_buckets")]
    pub max_buckets: u32,

    /// Maximum accepted value for the caller-supplied `limit` argument
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

fn default_hosts_index() -> String {
    "hosts".to_string()
}

fn default_max_buckets() -> u32 {
    100
}

fn default_max_limit() -> i64 {
    100
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            hosts_index: default_hosts_index(),
            max_buckets: default_max_buckets(),
            max_limit: default_max_limit(),
        }
    }
}

/// Query execution service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Request timeout in seconds; cancellation beyond this is the
    /// transport's concern, not the enumeration engine's
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default XDG location plus environment
    /// overrides (`HOSTFACET_QUERIES__MAX_BUCKETS` and friends).
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = default_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        let loaded: AppConfig = builder
            .add_source(Environment::with_prefix("HOSTFACET").separator("__"))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Load configuration from an explicit file path plus environment
    /// overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let loaded: AppConfig = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("HOSTFACET").separator("__"))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queries.hosts_index.is_empty() {
            return Err(ConfigError::Invalid(
                "Hosts index name cannot be empty".to_string(),
            ));
        }
        if self.queries.max_buckets == 0 {
            return Err(ConfigError::Invalid(
                "Bucket cap must be greater than zero".to_string(),
            ));
        }
        if self.queries.max_limit < 0 {
            return Err(ConfigError::Invalid(
                "Maximum limit cannot be negative".to_string(),
            ));
        }
        if self.search.base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "Search base URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config file path: `$XDG_CONFIG_HOME/hostfacet/config.toml`
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hostfacet").map(|dirs| dirs.config_dir().join("config.toml"))
}
