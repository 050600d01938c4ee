//! # Domain Errors
//!
//! Error types returned by every IP store operation.

use thiserror::Error;

/// IP store error types.
///
/// All of these are ordinary outcomes of caller-driven state changes and
/// are returned to the caller; the store never panics on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpStoreError {
    /// Address or network is not registered.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network specification is empty or not valid CIDR notation.
    #[error("Invalid network format: {0:?}")]
    InvalidFormat(String),

    /// Teardown could not complete.
    #[error("Shutdown failed: {0}")]
    ShutdownFailure(String),

    /// Store has been stopped (or is stopping) and rejects operations.
    #[error("IP store is stopped")]
    Stopped,

    /// No driver registered under this name.
    #[error("Unknown IP store driver: {0}")]
    UnknownDriver(String),

    /// A driver with this name is already registered.
    #[error("IP store driver already registered: {0}")]
    DuplicateDriver(String),

    /// Backend options were rejected.
    #[error("Invalid IP store configuration: {0}")]
    InvalidConfig(String),
}
