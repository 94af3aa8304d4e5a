//! LFU (Least Frequently Used) cache implementation
//!
//! Entries are grouped into per-frequency buckets, each an LRU list. The
//! eviction victim is the tail of the lowest-frequency bucket, so ties on
//! frequency fall back to least recent use.
//!
//! A new key starts at frequency 1. Hits and overwrites each add one.

use super::arena::{Arena, List};
use super::policy::{CacheConfigError, CachePolicy, validate_capacity};
use super::traits::Cache;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::hash::Hash;

/// LFU Cache - evicts least frequently used items
pub struct LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    capacity: usize,
    map: AHashMap<K, usize>,
    arena: Arena<K, V>,
    buckets: BTreeMap<u64, List>,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new(capacity: usize) -> Result<Self, CacheConfigError> {
        let capacity = validate_capacity(capacity)?;

        Ok(Self {
            capacity,
            map: AHashMap::with_capacity(capacity),
            arena: Arena::with_capacity(capacity),
            buckets: BTreeMap::new(),
        })
    }

    /// Access count of a key, without counting as an access
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let idx = *self.map.get(key)?;
        self.arena.get(idx).map(|node| node.frequency)
    }

    fn detach(&mut self, idx: usize, frequency: u64) {
        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            bucket.unlink(&mut self.arena, idx);
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
            }
        }
    }

    /// Bump the frequency and move the node to the head of its new bucket
    fn touch(&mut self, idx: usize) {
        let Some(node) = self.arena.get_mut(idx) else {
            return;
        };
        let old = node.frequency;
        node.frequency = old.saturating_add(1);
        let new = node.frequency;

        self.detach(idx, old);
        self.buckets
            .entry(new)
            .or_default()
            .push_front(&mut self.arena, idx);
    }

    fn evict_lfu(&mut self) -> Option<(K, V)> {
        let (frequency, idx) = {
            let (frequency, bucket) = self.buckets.first_key_value()?;
            (*frequency, bucket.tail()?)
        };
        self.detach(idx, frequency);

        let node = self.arena.take(idx)?;
        self.map.remove(&node.key);
        Some((node.key, node.value))
    }
}

impl<K, V> Cache<K, V> for LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn policy(&self) -> CachePolicy {
        CachePolicy::Lfu
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.touch(idx);
        self.arena.get(idx).map(|node| &node.value)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.arena.get_mut(idx) {
                node.value = value;
            }
            self.touch(idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict_lfu()
        } else {
            None
        };

        let idx = self.arena.insert(key.clone(), value, 1);
        self.buckets
            .entry(1)
            .or_default()
            .push_front(&mut self.arena, idx);
        self.map.insert(key, idx);

        evicted
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        let frequency = self.arena.get(idx)?.frequency;
        self.detach(idx, frequency);
        self.arena.take(idx).map(|node| node.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn configure(&mut self, capacity: usize) -> Result<Vec<(K, V)>, CacheConfigError> {
        self.capacity = validate_capacity(capacity)?;

        let mut trimmed = Vec::new();
        while self.map.len() > self.capacity {
            match self.evict_lfu() {
                Some(entry) => trimmed.push(entry),
                None => break,
            }
        }
        Ok(trimmed)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.arena.clear();
        self.buckets.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn eviction_order(&self) -> Vec<K> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.iter_from_tail(&self.arena))
            .filter_map(|idx| self.arena.get(idx).map(|node| node.key.clone()))
            .collect()
    }
}
