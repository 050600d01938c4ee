//! # Configuration
//!
//! Selects the backend driver, passes it opaque options, and optionally
//! seeds the store with addresses and networks at startup.
//!
//! ```toml
//! [ip_store]
//! driver = "memory"
//!
//! [ip_store.options]
//! ip_capacity = 1024
//!
//! [ip_store.seed]
//! ips = ["10.0.0.1", "::1"]
//! networks = ["192.168.0.0/16"]
//! ```

use crate::domain::IpStoreError;
use crate::ports::IpStore;
use crate::registry::DriverRegistry;
use serde::Deserialize;
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Driver used when none is configured.
pub const DEFAULT_DRIVER: &str = "memory";

/// Construction parameters handed to a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Registered driver name.
    pub name: String,
    /// Backend-specific options. Each driver validates its own keys.
    pub options: toml::Table,
}

impl DriverConfig {
    /// Config for `name` with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: toml::Table::new(),
        }
    }

    /// Set one backend option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVER)
    }
}

/// Entries loaded into a freshly opened store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Individual addresses.
    #[serde(default)]
    pub ips: Vec<IpAddr>,
    /// Networks in CIDR notation.
    #[serde(default)]
    pub networks: Vec<String>,
}

impl SeedConfig {
    /// Add every seed entry to `store`, stopping at the first failure.
    pub fn apply(&self, store: &dyn IpStore) -> Result<(), IpStoreError> {
        for ip in &self.ips {
            store.add_ip(*ip)?;
        }
        for network in &self.networks {
            store.add_network(network)?;
        }
        Ok(())
    }

    /// True when there is nothing to load.
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty() && self.networks.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ip_store: IpStoreSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct IpStoreSection {
    driver: Option<String>,
    #[serde(default)]
    options: toml::Table,
    #[serde(default)]
    seed: SeedConfig,
}

/// Top-level IP store configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpStoreConfig {
    /// Which driver to open, and its options.
    pub driver: DriverConfig,
    /// Entries to load after opening.
    pub seed: SeedConfig,
}

impl IpStoreConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let section = file.ip_store;

        Ok(Self {
            driver: DriverConfig {
                name: section.driver.unwrap_or_else(|| DEFAULT_DRIVER.to_string()),
                options: section.options,
            },
            seed: section.seed,
        })
    }

    /// Open the configured driver from `registry` and load the seed entries.
    ///
    /// A store whose seeding fails is stopped before the error is returned.
    pub fn open(&self, registry: &DriverRegistry) -> Result<Arc<dyn IpStore>, IpStoreError> {
        let store = registry.open(&self.driver)?;

        if let Err(err) = self.seed.apply(store.as_ref()) {
            let _ = store.stop();
            return Err(err);
        }

        if !self.seed.is_empty() {
            info!(
                "[ip-store] Seeded {} addresses and {} networks",
                self.seed.ips.len(),
                self.seed.networks.len()
            );
        }
        Ok(store)
    }
}

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
