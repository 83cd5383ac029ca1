//! IP-address blacklist.
//!
//! Same contract as the domain variant, keyed by the address value itself:
//! a fixed-width key needs no canonicalization step.

use std::net::IpAddr;

use tracing::debug;

use super::store::BlacklistStore;
use crate::ioc::IocValue;

/// Blacklist of IP-address indicators.
#[derive(Debug, Default)]
pub struct IpBlacklist {
    store: BlacklistStore<IpAddr, IocValue>,
}

impl IpBlacklist {
    /// Create an empty IP blacklist.
    pub fn new() -> Self {
        Self {
            store: BlacklistStore::new(),
        }
    }

    /// Insert an address with its classification value, replacing (and
    /// dropping) any value previously stored for the same address.
    /// Returns `true` when an existing entry was replaced.
    pub fn add(&mut self, addr: IpAddr, value: IocValue) -> bool {
        let replaced = self.store.insert(addr, value);
        if replaced {
            debug!(%addr, "replaced blacklist entry");
        }
        replaced
    }

    /// Exact-match lookup by address.
    pub fn lookup(&self, addr: IpAddr) -> Option<&IocValue> {
        self.store.get(&addr)
    }

    /// Remove an address, returning its value.
    pub fn remove(&mut self, addr: IpAddr) -> Option<IocValue> {
        self.store.remove(&addr)
    }

    /// Drop every entry. The blacklist remains usable (empty).
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of blacklisted addresses.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the blacklist is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
