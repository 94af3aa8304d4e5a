use super::error::{NewsError, Result};
use super::service::NewsService;
use super::types::{News, NewsCreate, NewsUpdate, Page, PageParams};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

struct Inner {
    rows: BTreeMap<i64, News>,
    next_id: i64,
}

/// In-memory news repository, the source of truth behind the cache
#[derive(Clone)]
pub struct NewsStore {
    inner: Arc<RwLock<Inner>>,
    /// Artificial delay before each operation, simulating I/O
    latency: Option<Duration>,
}

impl Default for NewsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsStore {
    pub fn new() -> Self {
        info!("Initializing in-memory news store");
        Self {
            inner: Arc::new(RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn simulate_io(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn validate(title: &str, text: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(NewsError::InvalidRequest("title must not be empty".into()));
        }
        if text.trim().is_empty() {
            return Err(NewsError::InvalidRequest("text must not be empty".into()));
        }
        Ok(())
    }

    fn filtered<F>(&self, params: PageParams, predicate: F) -> Page<News>
    where
        F: Fn(&News) -> bool,
    {
        let matches: Vec<News> = self
            .inner
            .read()
            .rows
            .values()
            .filter(|news| predicate(news))
            .cloned()
            .collect();
        Page::paginate(matches, params)
    }
}

impl NewsService for NewsStore {
    async fn find_by_id(&self, id: i64) -> Result<News> {
        self.simulate_io().await;
        debug!("NewsStore: find news by id={}", id);

        self.inner
            .read()
            .rows
            .get(&id)
            .cloned()
            .ok_or(NewsError::NotFound(id))
    }

    async fn find_all(&self, params: PageParams) -> Result<Page<News>> {
        self.simulate_io().await;
        Ok(self.filtered(params, |_| true))
    }

    async fn search_by_text(&self, params: PageParams, fragment: &str) -> Result<Page<News>> {
        self.simulate_io().await;
        debug!("NewsStore: search by text '{}'", fragment);
        Ok(self.filtered(params, |news| news.text.contains(fragment)))
    }

    async fn search_by_title(&self, params: PageParams, fragment: &str) -> Result<Page<News>> {
        self.simulate_io().await;
        debug!("NewsStore: search by title '{}'", fragment);
        Ok(self.filtered(params, |news| news.title.contains(fragment)))
    }

    async fn create(&self, input: NewsCreate) -> Result<News> {
        self.simulate_io().await;
        Self::validate(&input.title, &input.text)?;

        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let news = News {
            id,
            time: Utc::now(),
            title: input.title,
            text: input.text,
            user_id: input.user_id,
        };
        inner.rows.insert(id, news.clone());

        debug!("NewsStore: created news id={}", id);
        Ok(news)
    }

    async fn update(&self, input: NewsUpdate) -> Result<News> {
        self.simulate_io().await;
        Self::validate(&input.title, &input.text)?;

        let mut inner = self.inner.write();
        let news = inner
            .rows
            .get_mut(&input.id)
            .ok_or(NewsError::NotFound(input.id))?;

        news.title = input.title;
        news.text = input.text;
        news.user_id = input.user_id;

        debug!("NewsStore: updated news id={}", input.id);
        Ok(news.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.simulate_io().await;

        // Deleting an unknown id is not an error
        let removed = self.inner.write().rows.remove(&id).is_some();
        debug!("NewsStore: delete news id={} (existed={})", id, removed);
        Ok(())
    }
}
