use crate::cache::{CacheConfigError, CacheStats, SharedCache};
use crate::config::CacheConfig;
use crate::core::{News, NewsCreate, NewsError, NewsService, NewsStore, NewsUpdate, Page, PageParams};
use crate::proxy::CachingNewsService;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news: Arc<CachingNewsService<NewsStore>>,
}

impl AppState {
    pub fn new(news: CachingNewsService<NewsStore>) -> Self {
        Self {
            news: Arc::new(news),
        }
    }

    /// Build the store and its cache from configuration.
    ///
    /// Fails on an invalid capacity, so a misconfigured cache never serves.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheConfigError> {
        config.validate()?;
        let cache = SharedCache::new(config.algorithm, config.capacity)?;
        info!(
            "News cache ready: policy={}, capacity={}",
            config.algorithm, config.capacity
        );
        Ok(Self::new(CachingNewsService::new(NewsStore::new(), cache)))
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "news",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /api/news - paged list of all articles
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<News>>, NewsError> {
    debug!("REST LIST offset={}, limit={}", params.offset, params.limit);
    Ok(Json(state.news.find_all(params).await?))
}

/// GET /api/news/{id} - served from cache when possible
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<News>, NewsError> {
    debug!("REST GET id={}", id);
    Ok(Json(state.news.find_by_id(id).await?))
}

/// GET /api/news/search/text/{fragment}
pub async fn search_by_text(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<News>>, NewsError> {
    debug!("REST SEARCH text='{}'", fragment);
    Ok(Json(state.news.search_by_text(params, &fragment).await?))
}

/// GET /api/news/search/title/{fragment}
pub async fn search_by_title(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<News>>, NewsError> {
    debug!("REST SEARCH title='{}'", fragment);
    Ok(Json(state.news.search_by_title(params, &fragment).await?))
}

/// POST /api/news
pub async fn create_news(
    State(state): State<AppState>,
    Json(input): Json<NewsCreate>,
) -> Result<impl IntoResponse, NewsError> {
    debug!("REST CREATE title='{}'", input.title);
    let news = state.news.create(input).await?;
    info!("Created news id={}", news.id);
    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/news
pub async fn update_news(
    State(state): State<AppState>,
    Json(input): Json<NewsUpdate>,
) -> Result<Json<News>, NewsError> {
    debug!("REST UPDATE id={}", input.id);
    Ok(Json(state.news.update(input).await?))
}

/// DELETE /api/news/{id}
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, NewsError> {
    debug!("REST DELETE id={}", id);
    state.news.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/news/cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.news.cache().stats())
}

/// DELETE /api/news/cache - drop every cached article
pub async fn cache_invalidate(State(state): State<AppState>) -> StatusCode {
    state.news.cache().invalidate_all();
    info!("News cache invalidated");
    StatusCode::NO_CONTENT
}

/// GET /metrics - Prometheus metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    match crate::metrics::encode_metrics() {
        Ok(metrics) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            metrics,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}
