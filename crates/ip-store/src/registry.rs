//! # Driver Registry
//!
//! Maps driver names to factories so the host picks a backend once, at
//! startup, from configuration.
//!
//! ```rust
//! use ip_store::{DriverConfig, DriverRegistry};
//!
//! let registry = DriverRegistry::with_builtin();
//! let store = registry.open(&DriverConfig::new("memory")).unwrap();
//! store.add_network("10.0.0.0/8").unwrap();
//! assert!(store.has_ip("10.1.2.3".parse().unwrap()).unwrap());
//! store.stop().wait_blocking().unwrap();
//! ```

use crate::adapters::MemoryDriver;
use crate::config::DriverConfig;
use crate::domain::IpStoreError;
use crate::ports::{IpStore, IpStoreDriver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Registered IP store drivers, by name.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: HashMap<&'static str, Arc<dyn IpStoreDriver>>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Registry holding the drivers shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.drivers.insert(MemoryDriver::NAME, Arc::new(MemoryDriver));
        registry
    }

    /// Register a driver.
    ///
    /// # Errors
    ///
    /// `DuplicateDriver` if the name is taken.
    pub fn register(&mut self, driver: Arc<dyn IpStoreDriver>) -> Result<(), IpStoreError> {
        let name = driver.name();
        if self.drivers.contains_key(name) {
            return Err(IpStoreError::DuplicateDriver(name.to_string()));
        }

        info!("[ip-store] Registering driver {}", name);
        self.drivers.insert(name, driver);
        Ok(())
    }

    /// Whether a driver is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Registered driver names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.drivers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Open a store with the driver named in `config`.
    ///
    /// # Errors
    ///
    /// `UnknownDriver` if no such driver is registered, otherwise whatever
    /// the driver reports.
    pub fn open(&self, config: &DriverConfig) -> Result<Arc<dyn IpStore>, IpStoreError> {
        let driver = self
            .drivers
            .get(config.name.as_str())
            .ok_or_else(|| IpStoreError::UnknownDriver(config.name.clone()))?;

        driver.open(config)
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.names())
            .finish()
    }
}
