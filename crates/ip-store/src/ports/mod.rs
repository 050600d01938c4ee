//! # Ports Layer
//!
//! Trait definitions for IP store backends and their factories.

pub mod inbound;

pub use inbound::{IpStore, IpStoreDriver, IpStoreStats};
