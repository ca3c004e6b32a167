//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a recency log and
//! size-bounded trimming.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{trace, warn};

use crate::cache::{CacheStats, Cacheable, Counters, RecencyLog, Sizer, UnitSizer};
use crate::error::{CacheError, Result};

/// How far a trim pass shrinks the cache.
#[derive(Debug, Clone, Copy)]
enum TrimTarget {
    /// Evict until the total size is at most this value
    Capacity(usize),
    /// Evict until nothing is left, zero-sized values included
    Empty,
}

// == LRU Cache ==
/// Bounded key-value cache with approximate least-recently-used eviction.
///
/// Every hit and every insertion appends a record to a recency log. When the
/// total accounted size exceeds the capacity, records are consumed oldest
/// first: a record with a newer record for the same key behind it is
/// discarded, and a key whose last record is consumed is evicted. The key
/// evicted is therefore always the one whose most recent touch is oldest.
///
/// Values are accounted through a [`Sizer`]; the default charges 1 per value,
/// making the capacity an entry count.
///
/// Not synchronized. Use [`SharedCache`](crate::SharedCache) to share one
/// cache between threads.
pub struct LruCache<K, V, S = UnitSizer> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Access records, oldest first
    log: RecencyLog<K>,
    /// Lifetime hit/miss/eviction counters
    counters: Counters,
    /// Size accounting hook
    sizer: S,
    /// Sum of `sizer.size_of` over all stored values
    total_size: usize,
    /// Capacity each `put` trims to
    max_size: usize,
}

impl<K, V> LruCache<K, V, UnitSizer>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `max_size` is 0.
    pub fn new(max_size: usize) -> Result<Self> {
        Self::with_sizer(max_size, UnitSizer)
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Sizer<V>,
{
    /// Creates a cache whose values are accounted by `sizer`.
    ///
    /// # Arguments
    /// * `max_size` - Maximum total accounted size
    /// * `sizer` - Maps each value to its cost
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `max_size` is 0.
    pub fn with_sizer(max_size: usize, sizer: S) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidCapacity(max_size));
        }

        Ok(Self {
            entries: HashMap::new(),
            log: RecencyLog::new(),
            counters: Counters::default(),
            sizer,
            total_size: 0,
            max_size,
        })
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit is counted and refreshes the key's recency. A miss is counted
    /// and returns None. The total size is never affected.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.entries.get_key_value(key) {
            Some((stored, value)) => {
                self.counters.record_hit();
                self.log.record(stored.clone());
                Some(value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a value without counting it or refreshing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    // == Contains ==
    /// Returns true if a value is stored for `key`. Has no side effects.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    // == Put ==
    /// Stores a key-value pair, then trims the cache back to capacity.
    ///
    /// An existing value for the key is replaced and its size released
    /// before the new value is charged.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidArgument` if charging the value would
    /// overflow the total size. Nothing is modified in that case.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let new_size = self.sizer.size_of(&value);
        let released = self
            .entries
            .get(&key)
            .map_or(0, |old| self.sizer.size_of(old));
        let base = self.total_size.saturating_sub(released);

        let total_size = base.checked_add(new_size).ok_or_else(|| {
            CacheError::InvalidArgument(format!(
                "value of size {} overflows total size {}",
                new_size, base
            ))
        })?;

        self.entries.insert(key.clone(), value);
        self.total_size = total_size;
        self.log.record(key);

        self.trim(TrimTarget::Capacity(self.max_size));
        Ok(())
    }

    // == Remove ==
    /// Removes an entry by key and returns its value.
    ///
    /// Returns None if the key is absent. Recency records for the key stay
    /// queued and are discarded by later trims.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.entries.remove(key)?;
        self.total_size = self
            .total_size
            .saturating_sub(self.sizer.size_of(&value));
        Some(value)
    }

    // == Clear ==
    /// Evicts every entry, oldest first.
    ///
    /// Each entry cleared counts as an eviction.
    pub fn clear(&mut self) {
        self.trim(TrimTarget::Empty);

        // Whatever is still queued refers to keys no longer stored.
        if self.entries.is_empty() {
            self.log.clear();
        }
    }

    // == Size Of ==
    /// Returns the accounted size of `value`.
    pub fn size_of(&self, value: &V) -> usize {
        self.sizer.size_of(value)
    }

    // == Trim ==
    fn trim(&mut self, target: TrimTarget) {
        while !self.entries.is_empty() && self.exceeds(target) {
            let Some((key, last)) = self.log.pop_front() else {
                warn!(
                    total_size = self.total_size,
                    max_size = self.max_size,
                    entries = self.entries.len(),
                    "recency log exhausted while over capacity, trimming stopped"
                );
                break;
            };

            // a newer record for this key is still queued
            if !last {
                continue;
            }

            if self.remove(&key).is_some() {
                self.counters.record_eviction();
                trace!(
                    total_size = self.total_size,
                    evictions = self.counters.evictions(),
                    "evicted least recently used entry"
                );
            }
        }
    }

    fn exceeds(&self, target: TrimTarget) -> bool {
        match target {
            TrimTarget::Capacity(capacity) => self.total_size > capacity,
            TrimTarget::Empty => true,
        }
    }

    // == Accessors ==
    /// Returns the current total accounted size.
    pub fn size(&self) -> usize {
        self.total_size
    }

    /// Returns the capacity fixed at construction.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the number of entries evicted over the cache's lifetime.
    pub fn eviction_count(&self) -> u64 {
        self.counters.evictions()
    }

    /// Returns the number of lookups that found a value.
    pub fn hit_count(&self) -> u64 {
        self.counters.hits()
    }

    /// Returns the number of lookups for absent keys.
    pub fn miss_count(&self) -> u64 {
        self.counters.misses()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of queued recency records, stale ones included.
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits(),
            misses: self.counters.misses(),
            evictions: self.counters.evictions(),
            total_size: self.total_size,
            max_size: self.max_size,
            entries: self.entries.len(),
            log_len: self.log.len(),
        }
    }
}

impl<K, V, S> Cacheable<K, V> for LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Sizer<V>,
{
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }

    fn put(&mut self, key: K, value: V) -> Result<()> {
        LruCache::put(self, key, value)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("entries", &self.entries.len())
            .field("log_len", &self.log.len())
            .field("total_size", &self.total_size)
            .field("max_size", &self.max_size)
            .field("counters", &self.counters)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cache(max_size: usize) -> LruCache<String, String> {
        LruCache::new(max_size).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = cache(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.max_size(), 100);
    }

    #[test]
    fn test_store_zero_capacity() {
        let result: Result<LruCache<String, String>> = LruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = cache(100);

        store.put("key1".to_string(), "value1".to_string()).unwrap();

        assert_eq!(store.get("key1").map(String::as_str), Some("value1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = cache(100);

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.miss_count(), 1);
        assert_eq!(store.hit_count(), 0);
    }

    #[test]
    fn test_store_get_counts_hits_without_changing_size() {
        let mut store = cache(100);
        store.put("key1".to_string(), "value1".to_string()).unwrap();

        store.get("key1");
        store.get("key1");
        store.get("missing");

        assert_eq!(store.hit_count(), 2);
        assert_eq!(store.miss_count(), 1);
        assert_eq!(store.size(), 1);
        // one record for the put, one per hit
        assert_eq!(store.log_len(), 3);
    }

    #[test]
    fn test_store_peek_and_contains_have_no_side_effects() {
        let mut store = cache(100);
        store.put("key1".to_string(), "value1".to_string()).unwrap();

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
        assert_eq!(store.peek("key1").map(String::as_str), Some("value1"));
        assert_eq!(store.peek("key2"), None);

        assert_eq!(store.hit_count(), 0);
        assert_eq!(store.miss_count(), 0);
        assert_eq!(store.log_len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = cache(100);

        store.put("key1".to_string(), "value1".to_string()).unwrap();
        assert_eq!(store.remove("key1"), Some("value1".to_string()));

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let mut store = cache(100);
        store.put("key1".to_string(), "value1".to_string()).unwrap();

        assert_eq!(store.remove("nonexistent"), None);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = cache(100);

        store.put("key1".to_string(), "value1".to_string()).unwrap();
        store.put("key1".to_string(), "value2".to_string()).unwrap();

        assert_eq!(store.get("key1").map(String::as_str), Some("value2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = cache(3);

        store.put("key1".to_string(), "value1".to_string()).unwrap();
        store.put("key2".to_string(), "value2".to_string()).unwrap();
        store.put("key3".to_string(), "value3".to_string()).unwrap();

        // Cache is full, adding key4 should evict key1 (oldest)
        store.put("key4".to_string(), "value4".to_string()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.eviction_count(), 1);
        assert!(!store.contains("key1"));
        assert!(store.contains("key2"));
        assert!(store.contains("key3"));
        assert!(store.contains("key4"));
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = cache(3);

        store.put("key1".to_string(), "value1".to_string()).unwrap();
        store.put("key2".to_string(), "value2".to_string()).unwrap();
        store.put("key3".to_string(), "value3".to_string()).unwrap();

        // Access key1 to make it most recently used
        store.get("key1").unwrap();

        // Adding key4 should evict key2 (now oldest)
        store.put("key4".to_string(), "value4".to_string()).unwrap();

        assert!(store.contains("key1"));
        assert!(!store.contains("key2"));
    }

    #[test]
    fn test_store_lru_touch_on_overwrite() {
        let mut store = cache(2);

        store.put("a".to_string(), "1".to_string()).unwrap();
        store.put("b".to_string(), "1".to_string()).unwrap();
        store.put("a".to_string(), "2".to_string()).unwrap();
        store.put("c".to_string(), "1".to_string()).unwrap();

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
    }

    #[test]
    fn test_store_clear() {
        let mut store = cache(10);
        for i in 0..5 {
            store.put(i.to_string(), i.to_string()).unwrap();
        }
        store.get("2");

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.eviction_count(), 5);
        assert_eq!(store.log_len(), 0);
        assert_eq!(store.hit_count(), 1);
    }

    #[test]
    fn test_store_clear_after_remove_counts_only_stored_entries() {
        let mut store = cache(10);
        for i in 0..4 {
            store.put(i.to_string(), i.to_string()).unwrap();
        }
        store.remove("1");

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.eviction_count(), 3);
    }

    #[test]
    fn test_store_weighted_sizes() {
        let mut store = LruCache::with_sizer(10, |v: &String| v.len()).unwrap();

        store.put("a", "xxxx".to_string()).unwrap();
        store.put("b", "yyyy".to_string()).unwrap();
        assert_eq!(store.size(), 8);

        // 8 + 3 > 10, so "a" goes
        store.put("c", "zzz".to_string()).unwrap();
        assert_eq!(store.size(), 7);
        assert!(!store.contains("a"));
        assert_eq!(store.eviction_count(), 1);

        // overwrite releases the old cost first
        store.put("b", "y".to_string()).unwrap();
        assert_eq!(store.size(), 4);

        assert_eq!(store.remove("c"), Some("zzz".to_string()));
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_value_larger_than_capacity_is_evicted() {
        let mut store = LruCache::with_sizer(4, |v: &Vec<u8>| v.len()).unwrap();

        store.put("small", vec![0; 2]).unwrap();
        store.put("huge", vec![0; 16]).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.size(), 0);
        assert_eq!(store.eviction_count(), 2);
    }

    #[test]
    fn test_store_clear_removes_zero_sized_values() {
        let mut store = LruCache::with_sizer(4, |_: &u32| 0usize).unwrap();

        store.put("a", 1).unwrap();
        store.put("b", 2).unwrap();
        assert_eq!(store.size(), 0);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.eviction_count(), 2);
    }

    #[test]
    fn test_store_put_rejects_size_overflow() {
        let mut store = LruCache::with_sizer(usize::MAX, |v: &usize| *v).unwrap();

        store.put("a", usize::MAX - 1).unwrap();
        let result = store.put("b", 2);

        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
        assert!(!store.contains("b"));
        assert_eq!(store.size(), usize::MAX - 1);
        assert_eq!(store.log_len(), 1);

        // replacing "a" releases its cost, so this fits
        store.put("a", usize::MAX).unwrap();
        assert_eq!(store.size(), usize::MAX);
    }

    #[test]
    fn test_store_stats() {
        let mut store = cache(100);

        store.put("key1".to_string(), "value1".to_string()).unwrap();
        store.get("key1").unwrap();
        let _ = store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_size, 1);
        assert_eq!(stats.max_size, 100);
        assert_eq!(stats.log_len, 2);
    }

    #[test]
    fn test_store_debug_output() {
        let mut store = cache(4);
        store.put("key1".to_string(), "value1".to_string()).unwrap();
        store.get("key1");

        let debug = format!("{:?}", store);
        assert!(debug.starts_with("LruCache"));
        assert!(debug.contains("entries: 1"));
        assert!(debug.contains("log_len: 2"));
        assert!(debug.contains("total_size: 1"));
        assert!(debug.contains("max_size: 4"));
    }

    #[test]
    fn test_cacheable_dispatch() {
        fn fill<C: Cacheable<String, String>>(cache: &mut C) {
            cache.put("x".to_string(), "1".to_string()).unwrap();
            cache.put("y".to_string(), "2".to_string()).unwrap();
        }

        let mut store = cache(1);
        fill(&mut store);

        let dyn_cache: &mut dyn Cacheable<String, String> = &mut store;
        assert!(!dyn_cache.contains(&"x".to_string()));
        assert_eq!(dyn_cache.get(&"y".to_string()).cloned(), Some("2".to_string()));
        assert_eq!(dyn_cache.remove(&"y".to_string()), Some("2".to_string()));
        dyn_cache.clear();
        assert!(store.is_empty());
    }
}
