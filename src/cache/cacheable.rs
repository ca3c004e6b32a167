//! The capability set a cache exposes to callers.

use crate::error::Result;

/// Basic keyed cache operations.
pub trait Cacheable<K, V> {
    /// Returns true if a value is stored for `key`. Has no side effects.
    fn contains(&self, key: &K) -> bool;

    /// Returns the cached value for `key`, or None if absent.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes and returns the cached value for `key`, or None if absent.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: K, value: V) -> Result<()>;

    /// Drops every cached entry.
    fn clear(&mut self);
}
