//! # Domain Module
//!
//! Core types for the IP store: canonical keys, network entries, errors.

pub mod address_key;
pub mod errors;
pub mod network;

pub use address_key::{canonical_ip, AddressKey};
pub use errors::IpStoreError;
pub use network::NetworkEntry;
