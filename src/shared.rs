//! Shared Cache
//!
//! A cloneable handle that serializes every operation on one cache behind a
//! single lock.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, LruCache, Sizer, UnitSizer};
use crate::config::CacheConfig;
use crate::error::Result;

/// Thread-safe handle to an [`LruCache`].
///
/// Lookups append recency records, so reads need exclusive access too: every
/// operation holds the lock for its full duration. Clones share the same
/// cache.
pub struct SharedCache<K, V, S = UnitSizer> {
    /// Cache guarded by a single lock
    inner: Arc<Mutex<LruCache<K, V, S>>>,
}

impl<K, V, S> Clone for SharedCache<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V, UnitSizer>
where
    K: Hash + Eq + Clone,
{
    /// Creates a shared cache holding at most `max_size` entries.
    pub fn with_capacity(max_size: usize) -> Result<Self> {
        Ok(Self::new(LruCache::new(max_size)?))
    }

    /// Creates a shared cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::with_capacity(config.max_size)
    }
}

impl<K, V, S> SharedCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: Sizer<V>,
{
    /// Wraps an existing cache.
    pub fn new(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a clone of the cached value, counting the lookup and
    /// refreshing the key's recency on a hit.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Stores a key-value pair, then trims the cache back to capacity.
    pub fn put(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().put(key, value)
    }

    /// Removes an entry by key and returns its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Returns true if a value is stored for `key`. Has no side effects.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Evicts every entry, oldest first.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with exclusive access to the cache.
    ///
    /// Use this to make several operations atomic with respect to other
    /// handles.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V, S>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}
