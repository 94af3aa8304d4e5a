//! Cache-aside decorator for [`NewsService`]
//!
//! Reads consult the cache before the wrapped service. Writes go to the
//! wrapped service first and only touch the cache once it has succeeded,
//! so a rejected write never reaches the cache. The cache lock is only held
//! inside `SharedCache` calls, never across an `.await`.

use crate::cache::SharedCache;
use crate::core::error::Result;
use crate::core::{News, NewsCreate, NewsService, NewsUpdate, Page, PageParams};
use crate::metrics;
use std::time::Instant;
use tracing::debug;

pub struct CachingNewsService<S> {
    inner: S,
    cache: SharedCache<i64, News>,
}

impl<S: NewsService> CachingNewsService<S> {
    pub fn new(inner: S, cache: SharedCache<i64, News>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &SharedCache<i64, News> {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn observe<T>(operation: &str, started: Instant, result: &Result<T>) {
    let status = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_service_op(operation, status, started.elapsed().as_secs_f64());
}

impl<S: NewsService> NewsService for CachingNewsService<S> {
    async fn find_by_id(&self, id: i64) -> Result<News> {
        let started = Instant::now();

        if let Some(news) = self.cache.get(&id) {
            debug!("Caching proxy: served news id={} from cache", id);
            let result = Ok(news);
            observe("find_by_id", started, &result);
            return result;
        }

        let result = self.inner.find_by_id(id).await;
        if let Ok(news) = &result {
            self.cache.put(id, news.clone());
        }

        observe("find_by_id", started, &result);
        result
    }

    async fn find_all(&self, params: PageParams) -> Result<Page<News>> {
        self.inner.find_all(params).await
    }

    async fn search_by_text(&self, params: PageParams, fragment: &str) -> Result<Page<News>> {
        self.inner.search_by_text(params, fragment).await
    }

    async fn search_by_title(&self, params: PageParams, fragment: &str) -> Result<Page<News>> {
        self.inner.search_by_title(params, fragment).await
    }

    async fn create(&self, input: NewsCreate) -> Result<News> {
        let started = Instant::now();
        debug!("Caching proxy: create");

        let result = self.inner.create(input).await;
        if let Ok(news) = &result {
            self.cache.put(news.id, news.clone());
        }

        observe("create", started, &result);
        result
    }

    async fn update(&self, input: NewsUpdate) -> Result<News> {
        let started = Instant::now();
        debug!("Caching proxy: update id={}", input.id);

        let result = self.inner.update(input).await;
        if let Ok(news) = &result {
            self.cache.put(news.id, news.clone());
        }

        observe("update", started, &result);
        result
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let started = Instant::now();
        debug!("Caching proxy: delete id={}", id);

        let result = self.inner.delete(id).await;
        if result.is_ok() {
            self.cache.remove(&id);
        }

        observe("delete", started, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachePolicy;
    use crate::core::{NewsError, NewsStore};

    fn service(capacity: usize) -> CachingNewsService<NewsStore> {
        let cache = SharedCache::new(CachePolicy::Lru, capacity).unwrap();
        CachingNewsService::new(NewsStore::new(), cache)
    }

    fn create_input(title: &str) -> NewsCreate {
        NewsCreate {
            title: title.to_string(),
            text: "Text".to_string(),
            user_id: 1,
        }
    }

    #[tokio::test]
    async fn test_create_populates_cache() {
        let svc = service(4);
        let news = svc.create(create_input("First")).await.unwrap();

        assert!(svc.cache().contains(&news.id));
        assert_eq!(svc.find_by_id(news.id).await.unwrap(), news);
        assert_eq!(svc.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_cached_value() {
        let svc = service(4);
        let news = svc.create(create_input("Before")).await.unwrap();

        svc.update(NewsUpdate {
            id: news.id,
            title: "After".to_string(),
            text: "Text".to_string(),
            user_id: 1,
        })
        .await
        .unwrap();

        assert_eq!(svc.cache().get(&news.id).unwrap().title, "After");
    }

    #[tokio::test]
    async fn test_failed_read_not_cached() {
        let svc = service(4);

        assert_eq!(svc.find_by_id(3).await, Err(NewsError::NotFound(3)));
        assert!(svc.cache().is_empty());
    }

    #[tokio::test]
    async fn test_delete_invalidates() {
        let svc = service(4);
        let news = svc.create(create_input("Doomed")).await.unwrap();

        svc.delete(news.id).await.unwrap();
        assert!(!svc.cache().contains(&news.id));
        assert_eq!(
            svc.find_by_id(news.id).await,
            Err(NewsError::NotFound(news.id))
        );
    }

    #[tokio::test]
    async fn test_search_bypasses_cache() {
        let svc = service(4);
        svc.create(create_input("Alpha")).await.unwrap();
        let before = svc.cache().stats();

        let page = svc
            .search_by_title(PageParams::default(), "Alpha")
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);

        let after = svc.cache().stats();
        assert_eq!(before.hits + before.misses, after.hits + after.misses);
    }
}
