//! Shared helpers for integration tests.

#![allow(dead_code)]

use ip_store::{DriverConfig, DriverRegistry, IpStore};
use std::net::IpAddr;
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Open a memory store through the builtin registry.
pub fn open_memory_store() -> Arc<dyn IpStore> {
    init_tracing();
    DriverRegistry::with_builtin()
        .open(&DriverConfig::new("memory"))
        .expect("memory driver opens")
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid address literal")
}
