//! Process-wide cache handle
//!
//! A single mutex guards both the cache and its statistics. `get` mutates
//! ordering metadata, so there is no read/write split.

use super::bounded::BoundedCache;
use super::policy::{CacheConfigError, CachePolicy};
use super::traits::Cache;
use crate::metrics;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub policy: CachePolicy,
    pub capacity: usize,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub removals: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    fn record_hit(&mut self) {
        self.hits += 1;
        self.update_hit_rate();
    }

    fn record_miss(&mut self) {
        self.misses += 1;
        self.update_hit_rate();
    }

    fn update_hit_rate(&mut self) {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hit_rate = self.hits as f64 / total as f64;
        }
    }
}

struct State<K, V>
where
    K: Hash + Eq + Clone,
{
    cache: BoundedCache<K, V>,
    stats: CacheStats,
}

impl<K, V> State<K, V>
where
    K: Hash + Eq + Clone,
{
    fn sync_gauges(&mut self) {
        self.stats.entries = self.cache.len();
        self.stats.capacity = self.cache.capacity();
        metrics::set_cache_entries(self.stats.entries);
    }
}

/// Shared, thread-safe bounded cache. Clones refer to the same instance.
pub struct SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    state: Arc<Mutex<State<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    /// Create a new shared cache; fails on a non-positive capacity
    pub fn new(policy: CachePolicy, capacity: usize) -> Result<Self, CacheConfigError> {
        let cache = BoundedCache::new(policy, capacity)?;
        let stats = CacheStats {
            policy,
            capacity,
            ..CacheStats::default()
        };

        Ok(Self {
            state: Arc::new(Mutex::new(State { cache, stats })),
        })
    }

    /// Get a clone of the cached value, counting the access
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock();
        let value = state.cache.get(key).cloned();

        match value {
            Some(_) => {
                state.stats.record_hit();
                metrics::record_cache_op("get", "hit");
                debug!("Cache HIT for key: {:?}", key);
            }
            None => {
                state.stats.record_miss();
                metrics::record_cache_op("get", "miss");
                debug!("Cache MISS for key: {:?}", key);
            }
        }

        value
    }

    /// Insert or overwrite a value
    pub fn put(&self, key: K, value: V) {
        let mut state = self.state.lock();

        if state.cache.contains(&key) {
            state.stats.updates += 1;
            metrics::record_cache_op("put", "update");
        } else {
            state.stats.inserts += 1;
            metrics::record_cache_op("put", "insert");
        }

        debug!("Cache PUT: {:?}", key);
        if let Some((evicted, _)) = state.cache.put(key, value) {
            state.stats.evictions += 1;
            metrics::record_cache_evictions(1);
            debug!("Cache EVICT: {:?}", evicted);
        }

        state.sync_gauges();
    }

    /// Remove a value; returns whether it was present
    pub fn remove(&self, key: &K) -> bool {
        let mut state = self.state.lock();

        let removed = state.cache.remove(key).is_some();
        if removed {
            state.stats.removals += 1;
            metrics::record_cache_op("remove", "hit");
            debug!("Cache DELETE: {:?}", key);
        } else {
            metrics::record_cache_op("remove", "miss");
        }

        state.sync_gauges();
        removed
    }

    /// Resize, trimming immediately. Returns the number of trimmed entries.
    pub fn configure(&self, capacity: usize) -> Result<usize, CacheConfigError> {
        let mut state = self.state.lock();

        let trimmed = state.cache.configure(capacity)?.len();
        state.stats.evictions += trimmed as u64;
        metrics::record_cache_evictions(trimmed);
        state.sync_gauges();

        debug!("Cache resized to {} ({} entries trimmed)", capacity, trimmed);
        Ok(trimmed)
    }

    /// Invalidate (clear) entire cache
    pub fn invalidate_all(&self) {
        let mut state = self.state.lock();

        let count = state.cache.len();
        state.cache.clear();
        state.stats.removals += count as u64;
        state.sync_gauges();

        debug!("Cache INVALIDATE ALL ({} entries)", count);
    }

    /// Check membership without counting as an access
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().cache.contains(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().cache.capacity()
    }

    pub fn policy(&self) -> CachePolicy {
        self.state.lock().cache.policy()
    }

    pub fn eviction_order(&self) -> Vec<K> {
        self.state.lock().cache.eviction_order()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats.clone()
    }
}
