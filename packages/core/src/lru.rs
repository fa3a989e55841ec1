//! Bounded least-recently-used cache
//!
//! Backed by a hash index over an intrusive doubly linked list, so touch,
//! insert and eviction are all O(1). The front of the list is the least
//! recently used entry.

use linked_hash_map::LinkedHashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
pub struct LruCache<K: Hash + Eq, V> {
    entries: LinkedHashMap<K, V>,
    capacity: NonZeroUsize,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LinkedHashMap::new(),
            capacity,
        }
    }

    /// Fetch a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.entries.get_refresh(key).map(|value| &*value)
    }

    /// Check presence without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace a value, making it most recently used.
    ///
    /// A new key inserted at capacity first evicts the least recently used
    /// entry, which is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.entries.contains_key(&key) {
            self.entries.remove(&key);
            self.entries.insert(key, value);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity.get() {
            self.entries.pop_front()
        } else {
            None
        };

        self.entries.insert(key, value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}
