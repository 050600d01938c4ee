//! # IP Store
//!
//! Low-latency membership store answering whether an address is covered by
//! a configured allow/deny set of individual addresses and CIDR networks.
//!
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Gate decisions in a host network service (admitting peers, rejecting
//! clients) without touching an external database on the hot path:
//! - Canonical 16-byte keys so `1.2.3.4` and `::ffff:1.2.3.4` are one address
//! - Exact address set plus a linear-scan network set, read as one snapshot
//! - Non-blocking shutdown reported through a one-shot [`StopHandle`]
//!
//! Network membership is a plain containment scan sized for operator-kept
//! lists (tens to low thousands of entries), not a routing table.
//!
//! ## Module Structure
//!
//! ```text
//! ip-store/
//! ├── domain/      # AddressKey, NetworkEntry, IpStoreError
//! ├── ports/       # IpStore + IpStoreDriver traits
//! ├── adapters/    # MemoryIpStore, MemoryDriver
//! ├── registry     # DriverRegistry (name -> driver)
//! ├── config       # TOML configuration, seeding
//! └── shutdown     # StopHandle
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ip_store::{IpStore, MemoryIpStore};
//! use std::net::IpAddr;
//!
//! let store = MemoryIpStore::new();
//! store.add_ip("12.13.14.15".parse().unwrap()).unwrap();
//! store.add_network("192.168.22.255/24").unwrap();
//!
//! let mapped: IpAddr = "::ffff:12.13.14.15".parse().unwrap();
//! assert!(store.has_ip(mapped).unwrap());
//! assert!(store.has_ip("192.168.22.23".parse().unwrap()).unwrap());
//!
//! store.stop().wait_blocking().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod shutdown;

// Re-exports
pub use adapters::{MemoryDriver, MemoryIpStore, MemoryOptions};
pub use config::{ConfigError, DriverConfig, IpStoreConfig, SeedConfig, DEFAULT_DRIVER};
pub use domain::{canonical_ip, AddressKey, IpStoreError, NetworkEntry};
pub use ports::{IpStore, IpStoreDriver, IpStoreStats};
pub use registry::DriverRegistry;
pub use shutdown::{StopHandle, StopSignal};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
