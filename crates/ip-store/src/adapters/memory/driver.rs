//! Driver and options for the memory backend.

use super::MemoryIpStore;
use crate::config::DriverConfig;
use crate::domain::IpStoreError;
use crate::ports::{IpStore, IpStoreDriver};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Largest accepted capacity hint for either collection.
pub const MAX_CAPACITY_HINT: usize = 1 << 20;

/// Capacity hints for the memory backend.
///
/// ```toml
/// [ip_store.options]
/// ip_capacity = 1024
/// network_capacity = 64
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryOptions {
    /// Addresses to preallocate room for.
    #[serde(default)]
    pub ip_capacity: usize,
    /// Networks to preallocate room for.
    #[serde(default)]
    pub network_capacity: usize,
}

impl MemoryOptions {
    /// Read options from a driver's option table.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for unknown keys, wrong types, negative values or
    /// hints above [`MAX_CAPACITY_HINT`].
    pub fn from_table(options: &toml::Table) -> Result<Self, IpStoreError> {
        let parsed: Self = toml::Value::Table(options.clone())
            .try_into()
            .map_err(|e: toml::de::Error| IpStoreError::InvalidConfig(e.message().to_string()))?;

        for (key, value) in [
            ("ip_capacity", parsed.ip_capacity),
            ("network_capacity", parsed.network_capacity),
        ] {
            if value > MAX_CAPACITY_HINT {
                return Err(IpStoreError::InvalidConfig(format!(
                    "{} = {} exceeds maximum {}",
                    key, value, MAX_CAPACITY_HINT
                )));
            }
        }
        Ok(parsed)
    }
}

/// Factory for [`MemoryIpStore`], registered as `"memory"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDriver;

impl MemoryDriver {
    /// Registration name.
    pub const NAME: &'static str = "memory";
}

impl IpStoreDriver for MemoryDriver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn open(&self, config: &DriverConfig) -> Result<Arc<dyn IpStore>, IpStoreError> {
        let options = MemoryOptions::from_table(&config.options)?;
        info!(
            "[ip-store] Opening memory store (ip_capacity={}, network_capacity={})",
            options.ip_capacity, options.network_capacity
        );
        Ok(Arc::new(MemoryIpStore::with_options(options)))
    }
}
