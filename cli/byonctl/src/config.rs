//! CLI configuration.
//!
//! Sources, lowest priority first:
//! - an optional TOML file given with `--config`
//! - `BYON_`-prefixed environment variables (`BYON_HOSTS`, `BYON_LOG_LEVEL`, ...)
//! - command line flags, applied by the caller

use std::path::Path;

use anyhow::{Context, Result};
use byon_compute::ProviderConfig;
use serde::Deserialize;

/// Environment variable prefix.
const ENV_PREFIX: &str = "BYON";

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Pool expression.
    #[serde(default)]
    pub hosts: Option<String>,

    /// Default preferred-hosts expression for allocations.
    #[serde(default)]
    pub preferred_hosts: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON.
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to build config")?
            .try_deserialize()
            .context("Failed to deserialize config")
    }

    /// Provider configuration for building a pool.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let hosts = self
            .hosts
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or(byon_compute::PoolError::MissingConfig {
                key: byon_compute::properties::HOSTS.key,
            })?;

        Ok(ProviderConfig::new(hosts))
    }
}
