//! In-memory IP store.
//!
//! Exact addresses live in a hash set keyed by [`AddressKey`]; networks
//! live in a map keyed by their registration text and are checked with a
//! linear scan. Both sit behind one `RwLock` so a query never sees one
//! collection updated and the other not.

mod driver;


pub use driver::{MemoryDriver, MemoryOptions, MAX_CAPACITY_HINT};

use crate::domain::{AddressKey, IpStoreError, NetworkEntry};
use crate::ports::{IpStore, IpStoreStats};
use crate::shutdown::StopHandle;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::{HashMap, HashSet};
use std::io;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, trace};

const RUNNING: u8 = 0;
const SHUTTING_DOWN: u8 = 1;
const STOPPED: u8 = 2;

type TeardownJob = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Default)]
struct Collections {
    ips: HashSet<AddressKey>,
    networks: HashMap<String, NetworkEntry>,
}

impl Collections {
    fn with_capacity(options: MemoryOptions) -> Self {
        Self {
            ips: HashSet::with_capacity(options.ip_capacity),
            networks: HashMap::with_capacity(options.network_capacity),
        }
    }

    fn contains(&self, ip: IpAddr) -> bool {
        self.ips.contains(&AddressKey::from_ip(ip))
            || self.networks.values().any(|entry| entry.contains(ip))
    }
}

#[derive(Debug)]
struct Shared {
    collections: RwLock<Collections>,
    state: AtomicU8,
}

impl Shared {
    fn ensure_running(&self) -> Result<(), IpStoreError> {
        if self.state.load(Ordering::Acquire) == RUNNING {
            Ok(())
        } else {
            Err(IpStoreError::Stopped)
        }
    }

    /// Waits for in-flight operations, then drops both collections.
    fn teardown(&self) -> Result<(), IpStoreError> {
        let mut collections = self.collections.write();
        let ips = collections.ips.len();
        let networks = collections.networks.len();

        *collections = Collections::default();
        self.state.store(STOPPED, Ordering::Release);

        info!(
            "[ip-store] Memory store stopped, released {} addresses and {} networks",
            ips, networks
        );
        Ok(())
    }
}

/// Volatile, process-local IP store.
///
/// Cheap to share: wrap in an `Arc` (the driver does this) and call from
/// any number of threads.
#[derive(Debug)]
pub struct MemoryIpStore {
    shared: Arc<Shared>,
}

impl MemoryIpStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_options(MemoryOptions::default())
    }

    /// Create an empty store with preallocated capacity.
    pub fn with_options(options: MemoryOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                collections: RwLock::new(Collections::with_capacity(options)),
                state: AtomicU8::new(RUNNING),
            }),
        }
    }

    /// Whether `stop()` has been called.
    pub fn is_stopping(&self) -> bool {
        self.shared.state.load(Ordering::Acquire) != RUNNING
    }

    /// Whether teardown has finished.
    pub fn is_stopped(&self) -> bool {
        self.shared.state.load(Ordering::Acquire) == STOPPED
    }

    /// Registered network identifiers, sorted.
    pub fn networks(&self) -> Result<Vec<String>, IpStoreError> {
        let collections = self.read()?;
        let mut ids: Vec<_> = collections.networks.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    // The state is checked after the guard is taken, so nothing slips in
    // between stop() and teardown.
    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, IpStoreError> {
        let guard = self.shared.collections.read();
        self.shared.ensure_running()?;
        Ok(guard)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, IpStoreError> {
        let guard = self.shared.collections.write();
        self.shared.ensure_running()?;
        Ok(guard)
    }

    /// Claim the shutdown and hand teardown to `spawn`.
    ///
    /// If `spawn` fails the store goes back to running, so a later `stop()`
    /// can try again.
    fn stop_with<S>(&self, spawn: S) -> StopHandle
    where
        S: FnOnce(TeardownJob) -> io::Result<()>,
    {
        let claimed = self.shared.state.compare_exchange(
            RUNNING,
            SHUTTING_DOWN,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if claimed.is_err() {
            return StopHandle::ready(Err(IpStoreError::Stopped));
        }

        let (signal, handle) = StopHandle::channel();
        let shared = Arc::clone(&self.shared);
        let job: TeardownJob = Box::new(move || signal.complete(shared.teardown()));

        match spawn(job) {
            Ok(()) => handle,
            Err(err) => {
                self.shared.state.store(RUNNING, Ordering::Release);
                error!("[ip-store] Failed to spawn teardown thread: {}", err);
                StopHandle::ready(Err(IpStoreError::ShutdownFailure(format!(
                    "could not start teardown: {err}"
                ))))
            }
        }
    }
}

impl Default for MemoryIpStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IpStore for MemoryIpStore {
    fn add_ip(&self, ip: IpAddr) -> Result<(), IpStoreError> {
        let key = AddressKey::from_ip(ip);
        if self.write()?.ips.insert(key) {
            debug!("[ip-store] Added address {}", key);
        }
        Ok(())
    }

    fn remove_ip(&self, ip: IpAddr) -> Result<(), IpStoreError> {
        let key = AddressKey::from_ip(ip);
        if !self.write()?.ips.remove(&key) {
            return Err(IpStoreError::NotFound(ip.to_string()));
        }

        debug!("[ip-store] Removed address {}", key);
        Ok(())
    }

    fn has_ip(&self, ip: IpAddr) -> Result<bool, IpStoreError> {
        let found = self.read()?.contains(ip);
        trace!("[ip-store] has_ip {} -> {}", ip, found);
        Ok(found)
    }

    fn has_any_ip(&self, ips: &[IpAddr]) -> Result<bool, IpStoreError> {
        let collections = self.read()?;
        Ok(ips.iter().any(|ip| collections.contains(*ip)))
    }

    fn has_all_ips(&self, ips: &[IpAddr]) -> Result<bool, IpStoreError> {
        let collections = self.read()?;
        Ok(ips.iter().all(|ip| collections.contains(*ip)))
    }

    fn add_network(&self, network: &str) -> Result<(), IpStoreError> {
        let entry = NetworkEntry::parse(network)?;
        let net = entry.net();
        let id = entry.id().to_string();

        self.write()?.networks.insert(id.clone(), entry);
        debug!("[ip-store] Added network {} ({})", id, net);
        Ok(())
    }

    fn remove_network(&self, network: &str) -> Result<(), IpStoreError> {
        let entry = NetworkEntry::parse(network)?;
        let id = entry.id();
        if self.write()?.networks.remove(id).is_none() {
            return Err(IpStoreError::NotFound(id.to_string()));
        }

        debug!("[ip-store] Removed network {}", id);
        Ok(())
    }

    fn stats(&self) -> Result<IpStoreStats, IpStoreError> {
        let collections = self.read()?;
        Ok(IpStoreStats {
            ip_count: collections.ips.len(),
            network_count: collections.networks.len(),
        })
    }

    fn stop(&self) -> StopHandle {
        self.stop_with(|job| {
            thread::Builder::new()
                .name("ip-store-stop".to_string())
                .spawn(job)
                .map(drop)
        })
    }
}
