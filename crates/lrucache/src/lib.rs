//! # lrucache
//!
//! Fixed-capacity key/value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1))
//! - **Recency List**: Doubly-linked list threaded through the arena by slot
//!   index, most recently used at the head (O(1) reposition and eviction)
//!
//! The cache is single-threaded. Hosts that share one across threads wrap it
//! in a single lock; every operation both reads and mutates the list.
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, 1);
//! cache.put(2, 2);
//! assert_eq!(cache.get(&1), Some(1));
//! cache.put(3, 3); // evicts 2
//! assert_eq!(cache.get(&2), None);
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod lru;
mod stats;

pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::{Iter, LruCache};
pub use stats::CacheStats;
