//! Shared reference model for integration tests.
//!
//! The model is a plain `VecDeque` scanned linearly: slow, but obviously
//! correct recency bookkeeping to compare the cache against.

#![allow(dead_code)]

use std::collections::VecDeque;

use lrucache::LruCache;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Put(i32, i32),
    Get(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Got(Option<i32>),
    Evicted(Option<(i32, i32)>),
}

/// Front is most recently used
pub struct Model {
    capacity: usize,
    entries: VecDeque<(i32, i32)>,
}

impl Model {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    fn take(&mut self, key: i32) -> Option<(i32, i32)> {
        let pos = self.entries.iter().position(|&(k, _)| k == key)?;
        self.entries.remove(pos)
    }

    pub fn apply(&mut self, op: Op) -> Outcome {
        match op {
            Op::Get(key) => {
                let entry = self.take(key);
                if let Some(entry) = entry {
                    self.entries.push_front(entry);
                }
                Outcome::Got(entry.map(|(_, v)| v))
            }
            Op::Put(key, value) => {
                let existed = self.take(key).is_some();
                let evicted = if !existed && self.entries.len() == self.capacity {
                    self.entries.pop_back()
                } else {
                    None
                };
                self.entries.push_front((key, value));
                Outcome::Evicted(evicted)
            }
        }
    }

    pub fn snapshot(&self) -> Vec<(i32, i32)> {
        self.entries.iter().copied().collect()
    }
}

pub fn apply(cache: &mut LruCache<i32, i32>, op: Op) -> Outcome {
    match op {
        Op::Get(key) => Outcome::Got(cache.get(&key)),
        Op::Put(key, value) => Outcome::Evicted(cache.put(key, value)),
    }
}

/// Small key space so workloads mix hits, updates and evictions
pub fn op_strategy(max_key: i32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..max_key, any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        (0..max_key).prop_map(Op::Get),
    ]
}
