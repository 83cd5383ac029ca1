//! Domain-name blacklist keyed by reversed label order.

use tracing::debug;

use super::store::BlacklistStore;
use crate::ioc::IocValue;

/// Build the canonical storage key for a domain: the dot-delimited labels
/// in reverse order, so `"www.example.com"` becomes `"com.example.www"`.
///
/// Reversal groups entries under a common registrable domain next to each
/// other, which lets a prefix-sharing backing (a compressed trie) compact
/// large feeds full of sibling subdomains. The key contract is kept here
/// even over a hash backing so the backing can change without a feed
/// migration.
///
/// The caller's string is never mutated. Single-label inputs and empty
/// labels pass through structurally unchanged, and applying the reversal
/// twice restores the original label order.
pub fn canonical_key(domain: &str) -> String {
    let mut labels: Vec<&str> = domain.split('.').collect();
    labels.reverse();
    labels.join(".")
}

/// Blacklist of domain-name indicators.
#[derive(Debug, Default)]
pub struct DomainBlacklist {
    store: BlacklistStore<String, IocValue>,
}

impl DomainBlacklist {
    /// Create an empty domain blacklist.
    pub fn new() -> Self {
        Self {
            store: BlacklistStore::new(),
        }
    }

    /// Insert a domain with its classification value, replacing (and
    /// dropping) any value previously stored for the same domain.
    /// Returns `true` when an existing entry was replaced.
    pub fn add(&mut self, domain: &str, value: IocValue) -> bool {
        let replaced = self.store.insert(canonical_key(domain), value);
        if replaced {
            debug!(domain, "replaced blacklist entry");
        }
        replaced
    }

    /// Exact-match lookup. A domain is only blacklisted if it was inserted
    /// itself; a blacklisted parent domain does not match (see module docs).
    pub fn lookup(&self, domain: &str) -> Option<&IocValue> {
        self.store.get(canonical_key(domain).as_str())
    }

    /// Remove a domain, returning its value.
    pub fn remove(&mut self, domain: &str) -> Option<IocValue> {
        self.store.remove(canonical_key(domain).as_str())
    }

    /// Drop every entry. The blacklist remains usable (empty).
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of blacklisted domains.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the blacklist is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
