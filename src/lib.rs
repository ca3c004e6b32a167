//! Recency Cache - A bounded in-memory key-value cache
//!
//! Evicts entries in approximate least-recently-used order, accounts for
//! value sizes through a pluggable hook, and keeps lifetime hit, miss, and
//! eviction counters.
//!
//! ```
//! use recency_cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.put("a", 1).unwrap();
//! cache.put("b", 1).unwrap();
//! cache.get("a");
//! cache.put("c", 1).unwrap();
//!
//! assert!(cache.contains("a"));
//! assert!(!cache.contains("b"));
//! assert_eq!(cache.eviction_count(), 1);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;

pub use cache::{CacheStats, Cacheable, LruCache, Sizer, UnitSizer};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use shared::SharedCache;
