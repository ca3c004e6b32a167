//! Cache Module
//!
//! Provides a bounded in-memory cache with approximate LRU eviction and
//! pluggable size accounting.

mod cacheable;
mod recency;
mod sizer;
mod stats;
mod store;


// Re-export public types
pub use cacheable::Cacheable;
pub use recency::RecencyLog;
pub use sizer::{Sizer, UnitSizer};
pub use stats::CacheStats;
pub use store::LruCache;

pub(crate) use stats::Counters;
