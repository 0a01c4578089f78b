//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a `Vec` arena and are linked into a doubly-linked recency
//! list by arena index, so repositioning is O(1) with no shared ownership.
//! The index maps each resident key to its arena slot.
//!
//! ```text
//!   head ──► [slot 2] ◄──► [slot 0] ◄──► [slot 1] ◄── tail
//!             MRU                          LRU
//! ```
//!
//! Slots are never freed: once the arena is full, an insert of a new key
//! overwrites the tail slot in place.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::stats::CacheStats;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V, S = RandomState> {
    map: HashMap<K, usize, S>,
    nodes: Vec<Node<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries, at least 1
    ///
    /// # Returns
    /// * `Result<LruCache>` - `Error::InvalidCapacity` if capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, RandomState::new())
    }

    /// Create a new LRU cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Create a new LRU cache using `hasher` for the key index
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        debug!(capacity, "created LRU cache");

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Get a copy of the value for `key`, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&idx) => {
                self.move_to_front(idx);
                self.stats.record_hit();
                Some(self.nodes[idx].value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert or update a key-value pair, marking it most recently used
    ///
    /// # Returns
    /// * `Option<(K, V)>` - The evicted entry, if the cache was full and `key`
    ///   was not resident
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            self.nodes[idx].value = value;
            self.move_to_front(idx);
            self.stats.record_update();
            return None;
        }

        self.stats.record_insert();
        let node = Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };

        if self.nodes.len() < self.capacity {
            let idx = self.nodes.len();
            self.nodes.push(node);
            self.attach_front(idx);
            self.map.insert(key, idx);
            return None;
        }

        // Full: the tail slot is reused for the new entry.
        let idx = self.tail?;
        self.unlink(idx);
        let evicted = std::mem::replace(&mut self.nodes[idx], node);
        self.map.remove(&evicted.key);
        self.attach_front(idx);
        self.map.insert(key, idx);

        self.stats.record_eviction();
        trace!(slot = idx, "evicted least recently used entry");

        Some((evicted.key, evicted.value))
    }

    /// Get a copy of the value for `key` without touching recency order
    pub fn peek(&self, key: &K) -> Option<V> {
        self.map.get(key).map(|&idx| self.nodes[idx].value.clone())
    }

    /// Check whether `key` is resident without touching recency order
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Copy out all entries from most to least recently used
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Verify that the index and the recency list agree
    pub fn check_invariants(&self) -> Result<()> {
        let len = self.map.len();
        if len != self.nodes.len() {
            return Err(Error::Invariant(format!(
                "index has {} keys but arena has {} nodes",
                len,
                self.nodes.len()
            )));
        }
        if len > self.capacity {
            return Err(Error::Invariant(format!(
                "{} entries exceed capacity {}",
                len, self.capacity
            )));
        }

        let mut prev = None;
        let mut cursor = self.head;
        let mut walked = 0;
        while let Some(idx) = cursor {
            if walked == len {
                return Err(Error::Invariant("recency list is longer than index".into()));
            }
            let node = &self.nodes[idx];
            if node.prev != prev {
                return Err(Error::Invariant(format!("slot {} has a stale back-link", idx)));
            }
            if self.map.get(&node.key) != Some(&idx) {
                return Err(Error::Invariant(format!(
                    "slot {} is not the indexed slot for its key",
                    idx
                )));
            }
            prev = cursor;
            cursor = node.next;
            walked += 1;
        }

        if walked != len {
            return Err(Error::Invariant(format!(
                "recency list has {} entries but index has {}",
                walked, len
            )));
        }
        if self.tail != prev {
            return Err(Error::Invariant("tail is not the last list entry".into()));
        }
        Ok(())
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Get the current number of resident entries
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset cache statistics (entries are untouched)
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.attach_front(idx);
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[idx];
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => self.nodes[head_idx].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &self.nodes[idx];
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.nodes[prev_idx].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_idx) => self.nodes[next_idx].prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `key=value` pairs from most to least recently used
impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Borrowing iterator over cache entries, most recently used first
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.nodes[idx];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
