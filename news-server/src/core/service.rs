use super::error::Result;
use super::types::{News, NewsCreate, NewsUpdate, Page, PageParams};
use std::future::Future;

/// Read/write operations over news articles.
///
/// Implemented by the backing store and by the caching decorator, so the
/// HTTP layer can be handed either one.
pub trait NewsService: Send + Sync + 'static {
    /// Fails with `NewsError::NotFound` when the id is unknown
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<News>> + Send;

    fn find_all(&self, params: PageParams) -> impl Future<Output = Result<Page<News>>> + Send;

    /// Substring match on the article body
    fn search_by_text(
        &self,
        params: PageParams,
        fragment: &str,
    ) -> impl Future<Output = Result<Page<News>>> + Send;

    /// Substring match on the title
    fn search_by_title(
        &self,
        params: PageParams,
        fragment: &str,
    ) -> impl Future<Output = Result<Page<News>>> + Send;

    fn create(&self, input: NewsCreate) -> impl Future<Output = Result<News>> + Send;

    /// `input.id` selects the record to update
    fn update(&self, input: NewsUpdate) -> impl Future<Output = Result<News>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}
