//! Cache Statistics Module
//!
//! Tracks lifetime usage counters: hits, misses, and evictions.

use serde::Serialize;

// == Counters ==
/// Lifetime counters owned by a cache instance.
///
/// Counters only ever grow; they reset only when a new cache is built.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Counters {
    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }

    pub(crate) fn misses(&self) -> u64 {
        self.misses
    }

    pub(crate) fn evictions(&self) -> u64 {
        self.evictions
    }

    // == Record Hit ==
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of a cache's counters and occupancy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of entries removed by trimming, `clear` included
    pub evictions: u64,
    /// Sum of the accounted sizes of all stored values
    pub total_size: usize,
    /// Capacity the cache trims to
    pub max_size: usize,
    /// Number of stored entries
    pub entries: usize,
    /// Number of queued recency records, stale ones included
    pub log_len: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
