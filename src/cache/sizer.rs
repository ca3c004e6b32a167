//! Size accounting hook.
//!
//! A `Sizer` decides how much of the cache's capacity a value consumes. The
//! default charges one unit per value, so capacity counts entries.

// == Sizer Trait ==
/// Maps a value to its accounted cost.
///
/// Any `Fn(&V) -> usize` is a sizer:
///
/// ```
/// use recency_cache::LruCache;
///
/// let mut cache = LruCache::with_sizer(16, |v: &String| v.len()).unwrap();
/// cache.put("greeting", "hello".to_string()).unwrap();
/// assert_eq!(cache.size(), 5);
/// ```
pub trait Sizer<V> {
    /// Returns the accounted size of `value`.
    fn size_of(&self, value: &V) -> usize;
}

// == Unit Sizer ==
/// Charges every value a cost of 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSizer;

impl<V> Sizer<V> for UnitSizer {
    fn size_of(&self, _value: &V) -> usize {
        1
    }
}

impl<V, F> Sizer<V> for F
where
    F: Fn(&V) -> usize,
{
    fn size_of(&self, value: &V) -> usize {
        self(value)
    }
}
