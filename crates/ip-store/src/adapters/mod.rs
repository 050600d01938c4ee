//! # Adapters Layer
//!
//! Concrete IP store backends.

pub mod memory;

pub use memory::{MemoryDriver, MemoryIpStore, MemoryOptions};
