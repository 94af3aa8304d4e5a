//! Cache Module
//!
//! Bounded in-memory caches with deterministic eviction:
//! - LRU: Least Recently Used
//! - LFU: Least Frequently Used, ties broken by recency
//!
//! The policy is selected once from configuration and the resulting cache
//! is shared process-wide through [`SharedCache`].

mod arena;
pub mod bounded;
pub mod lfu;
pub mod lru;
pub mod policy;
pub mod shared;
pub mod traits;

pub use bounded::BoundedCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use policy::{CacheConfigError, CachePolicy};
pub use shared::{CacheStats, SharedCache};
pub use traits::Cache;
