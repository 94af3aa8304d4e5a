pub mod cache;
pub mod config;
pub mod core;
pub mod metrics;
pub mod proxy;
pub mod server;

// Re-export commonly used types
pub use cache::{
    BoundedCache, Cache, CacheConfigError, CachePolicy, CacheStats, LfuCache, LruCache,
    SharedCache,
};
pub use config::{CacheConfig, ServerConfig};
pub use core::{News, NewsCreate, NewsError, NewsService, NewsStore, NewsUpdate, Page, PageParams};
pub use metrics::init_metrics;
pub use proxy::CachingNewsService;
pub use server::{AppState, create_router};
