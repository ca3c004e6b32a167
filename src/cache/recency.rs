//! Recency Log Module
//!
//! Append-only FIFO of key-touch records used to approximate LRU order.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// == Recency Log ==
/// Records every access or insertion of a key, oldest first.
///
/// A key may be queued any number of times, and a queued key is not
/// necessarily still cached. A record is stale when a newer record for the
/// same key sits further back in the queue.
///
/// Alongside the queue, a per-key count of pending records answers "does this
/// key occur again later in the log" without scanning.
#[derive(Debug)]
pub struct RecencyLog<K> {
    /// Records in chronological order (front = oldest)
    queue: VecDeque<K>,
    /// Number of queued records per key; keys with none are absent
    pending: HashMap<K, usize>,
}

impl<K> Default for RecencyLog<K> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> RecencyLog<K> {
    // == Constructor ==
    /// Creates a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Appends a record for `key` at the back of the log.
    pub fn record(&mut self, key: K) {
        *self.pending.entry(key.clone()).or_insert(0) += 1;
        self.queue.push_back(key);
    }

    // == Pop Front ==
    /// Removes the oldest record.
    ///
    /// Returns the key and whether that was its last pending record. A record
    /// that is not the last is stale. Returns None if the log is empty.
    pub fn pop_front(&mut self) -> Option<(K, bool)> {
        let key = self.queue.pop_front()?;

        let last = match self.pending.entry(key.clone()) {
            Entry::Occupied(mut slot) => {
                *slot.get_mut() -= 1;
                if *slot.get() == 0 {
                    slot.remove();
                    true
                } else {
                    false
                }
            }
            // every queued key is counted
            Entry::Vacant(_) => true,
        };

        Some((key, last))
    }

    // == Pending ==
    /// Returns how many records for `key` are queued.
    pub fn pending(&self, key: &K) -> usize {
        self.pending.get(key).copied().unwrap_or(0)
    }

}

impl<K> RecencyLog<K> {
    // == Length ==
    /// Returns the number of queued records, stale ones included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    // == Is Empty ==
    /// Returns true if no records are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    // == Clear ==
    /// Drops every record.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending.clear();
    }
}
