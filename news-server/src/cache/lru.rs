//! LRU (Least Recently Used) cache implementation
//!
//! O(1) get/put/remove: a hash index maps keys to arena slots and a single
//! doubly-linked list keeps recency order.

use super::arena::{Arena, List};
use super::policy::{CacheConfigError, CachePolicy, validate_capacity};
use super::traits::Cache;
use ahash::AHashMap;
use std::hash::Hash;

/// LRU Cache with configurable capacity
pub struct LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    capacity: usize,
    map: AHashMap<K, usize>,
    arena: Arena<K, V>,
    order: List,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    pub fn new(capacity: usize) -> Result<Self, CacheConfigError> {
        let capacity = validate_capacity(capacity)?;

        Ok(Self {
            capacity,
            map: AHashMap::with_capacity(capacity),
            arena: Arena::with_capacity(capacity),
            order: List::default(),
        })
    }

    /// Remove the least recently used item (tail)
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let tail_idx = self.order.tail()?;
        self.order.unlink(&mut self.arena, tail_idx);

        let node = self.arena.take(tail_idx)?;
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn policy(&self) -> CachePolicy {
        CachePolicy::Lru
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.order.move_to_front(&mut self.arena, idx);
        self.arena.get(idx).map(|node| &node.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.arena.get_mut(idx) {
                node.value = value;
            }
            self.order.move_to_front(&mut self.arena, idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.arena.insert(key.clone(), value, 1);
        self.order.push_front(&mut self.arena, idx);
        self.map.insert(key, idx);

        evicted
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.order.unlink(&mut self.arena, idx);
        self.arena.take(idx).map(|node| node.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn configure(&mut self, capacity: usize) -> Result<Vec<(K, V)>, CacheConfigError> {
        self.capacity = validate_capacity(capacity)?;

        let mut trimmed = Vec::new();
        while self.map.len() > self.capacity {
            match self.evict_lru() {
                Some(entry) => trimmed.push(entry),
                None => break,
            }
        }
        Ok(trimmed)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.arena.clear();
        self.order = List::default();
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn eviction_order(&self) -> Vec<K> {
        self.order
            .iter_from_tail(&self.arena)
            .filter_map(|idx| self.arena.get(idx).map(|node| node.key.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_basic_operations() {
        let mut cache = LruCache::new(2).unwrap();

        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_zero_capacity_rejected() {
        assert!(matches!(
            LruCache::<u64, u64>::new(0),
            Err(CacheConfigError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("c", 3), Some(("a", 1)));

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lru_update_existing() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);

        // Overwrite refreshes recency without evicting
        assert_eq!(cache.put("a", 10), None);
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.eviction_order(), vec!["a", "c"]);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);

        cache.put("c", 3);
        assert_eq!(cache.eviction_order(), vec!["c"]);
    }

    #[test]
    fn test_lru_contains_does_not_touch() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.contains(&"a"));

        cache.put("c", 3);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn test_lru_configure_trims_oldest() {
        let mut cache = LruCache::new(4).unwrap();

        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            cache.put(k, v);
        }
        cache.get(&"a");

        let trimmed = cache.configure(2).unwrap();
        assert_eq!(trimmed, vec![("b", 2), ("c", 3)]);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.eviction_order(), vec!["d", "a"]);

        assert_eq!(
            cache.configure(0),
            Err(CacheConfigError::InvalidCapacity(0))
        );
        assert_eq!(cache.capacity(), 2);
    }
}
