//! Core traits for caching functionality

use super::policy::{CacheConfigError, CachePolicy};
use std::hash::Hash;

/// Fixed-capacity key/value store with a deterministic eviction policy.
///
/// `get` counts as a use of the entry (recency and/or frequency are
/// updated), which is why it takes `&mut self`.
pub trait Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Eviction policy implemented by this cache
    fn policy(&self) -> CachePolicy;

    /// Get a value, marking the entry as used on a hit
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Insert or overwrite a value.
    ///
    /// Inserting a new key into a full cache evicts exactly one entry,
    /// which is returned. Overwrites never evict.
    fn put(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Remove a value; absent keys are a no-op
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Check membership without touching usage metadata
    fn contains(&self, key: &K) -> bool;

    /// Change the capacity, trimming immediately in eviction order.
    ///
    /// Returns the trimmed entries.
    fn configure(&mut self, capacity: usize) -> Result<Vec<(K, V)>, CacheConfigError>;

    /// Clear all entries from the cache
    fn clear(&mut self);

    /// Get the number of entries in the cache
    fn len(&self) -> usize;

    /// Check if the cache is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the capacity of the cache
    fn capacity(&self) -> usize;

    /// Keys ordered from next eviction victim to most protected
    fn eviction_order(&self) -> Vec<K>;
}
