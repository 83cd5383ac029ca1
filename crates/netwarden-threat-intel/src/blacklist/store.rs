//! The generic canonical-key store shared by every blacklist variant.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Associative store mapping canonical indicator keys to owned values.
///
/// One implementation serves every key type: the domain blacklist
/// instantiates it with reversed-label strings, the IP blacklist with
/// address values. The store owns its values outright; replacing or
/// clearing an entry drops the old value exactly once.
///
/// Keys are unique and unordered. Callers must canonicalize before
/// inserting or looking up; the store itself never rewrites keys.
#[derive(Debug)]
pub struct BlacklistStore<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> BlacklistStore<K, V> {
    /// Create an empty store with unbounded capacity.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a value under a canonical key, replacing any existing value.
    ///
    /// The previous value, if any, is dropped here (replace semantics, not
    /// duplicate semantics). Returns `true` when an entry was replaced.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.entries.insert(key, value).is_some()
    }

    /// Exact lookup by canonical key. Absence is a normal result, not an
    /// error.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Remove an entry, returning its value to the caller.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Drop every stored value. The store remains usable (empty).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for BlacklistStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
