//! # Inbound Ports
//!
//! The capability every IP store backend exposes. Host services hold an
//! `Arc<dyn IpStore>` and never depend on a concrete backend.

use crate::config::DriverConfig;
use crate::domain::IpStoreError;
use crate::shutdown::StopHandle;
use std::net::IpAddr;
use std::sync::Arc;

/// Entry counts for a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpStoreStats {
    /// Exact addresses registered.
    pub ip_count: usize,
    /// Networks registered.
    pub network_count: usize,
}

/// IP membership store - inbound port.
///
/// An address is a member if it was added directly or if it falls inside
/// any registered network. IPv4 addresses may be passed in either their
/// 4-byte or IPv4-mapped IPv6 form with identical results.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Queries observe both the address
/// set and the network set as one consistent snapshot.
pub trait IpStore: Send + Sync {
    /// Add a single address. Adding a present address is not an error.
    fn add_ip(&self, ip: IpAddr) -> Result<(), IpStoreError>;

    /// Remove a single address.
    ///
    /// # Errors
    ///
    /// `NotFound` if the address was not added.
    fn remove_ip(&self, ip: IpAddr) -> Result<(), IpStoreError>;

    /// Whether the address was added or lies inside a registered network.
    fn has_ip(&self, ip: IpAddr) -> Result<bool, IpStoreError>;

    /// Whether at least one address is a member. False for empty input.
    fn has_any_ip(&self, ips: &[IpAddr]) -> Result<bool, IpStoreError>;

    /// Whether every address is a member. True for empty input.
    fn has_all_ips(&self, ips: &[IpAddr]) -> Result<bool, IpStoreError>;

    /// Register a network in CIDR notation, keyed by the trimmed text.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for empty or unparseable input.
    fn add_network(&self, network: &str) -> Result<(), IpStoreError>;

    /// Remove a network by the exact text it was registered under.
    ///
    /// No CIDR equivalence is computed: `10.0.0.1/8` does not remove
    /// `10.0.0.0/8`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for empty or unparseable input, `NotFound` for an
    /// unregistered key.
    fn remove_network(&self, network: &str) -> Result<(), IpStoreError>;

    /// Current entry counts.
    fn stats(&self) -> Result<IpStoreStats, IpStoreError>;

    /// Begin shutdown without blocking.
    ///
    /// The returned handle resolves exactly once. Operations issued after
    /// this call are rejected with `Stopped`.
    fn stop(&self) -> StopHandle;
}

/// Factory for one kind of IP store backend.
pub trait IpStoreDriver: Send + Sync {
    /// Name the driver is registered under.
    fn name(&self) -> &'static str;

    /// Construct a ready store from backend options.
    fn open(&self, config: &DriverConfig) -> Result<Arc<dyn IpStore>, IpStoreError>;
}
