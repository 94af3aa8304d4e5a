use super::lfu::LfuCache;
use super::lru::LruCache;
use super::policy::{CacheConfigError, CachePolicy};
use super::traits::Cache;
use std::hash::Hash;

/// Cache whose eviction policy is chosen once, at construction
pub enum BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new(policy: CachePolicy, capacity: usize) -> Result<Self, CacheConfigError> {
        Ok(match policy {
            CachePolicy::Lru => Self::Lru(LruCache::new(capacity)?),
            CachePolicy::Lfu => Self::Lfu(LfuCache::new(capacity)?),
        })
    }

    /// Build from the raw policy name found in configuration
    pub fn from_name(policy: &str, capacity: usize) -> Result<Self, CacheConfigError> {
        Self::new(policy.parse()?, capacity)
    }
}

macro_rules! dispatch {
    ($self:expr, $cache:ident => $body:expr) => {
        match $self {
            BoundedCache::Lru($cache) => $body,
            BoundedCache::Lfu($cache) => $body,
        }
    };
}

impl<K, V> Cache<K, V> for BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn policy(&self) -> CachePolicy {
        dispatch!(self, c => c.policy())
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(self, c => c.get(key))
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        dispatch!(self, c => c.put(key, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        dispatch!(self, c => c.remove(key))
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(self, c => c.contains(key))
    }

    fn configure(&mut self, capacity: usize) -> Result<Vec<(K, V)>, CacheConfigError> {
        dispatch!(self, c => c.configure(capacity))
    }

    fn clear(&mut self) {
        dispatch!(self, c => c.clear())
    }

    fn len(&self) -> usize {
        dispatch!(self, c => c.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, c => c.capacity())
    }

    fn eviction_order(&self) -> Vec<K> {
        dispatch!(self, c => c.eviction_order())
    }
}
