use super::handlers::{self, AppState};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

async fn track_http(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let response = next.run(request).await;
    crate::metrics::record_http_request(&method, response.status().as_u16());
    response
}

/// Create the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        // News REST API endpoints
        .route(
            "/api/news",
            get(handlers::list_news)
                .post(handlers::create_news)
                .put(handlers::update_news),
        )
        .route(
            "/api/news/{id}",
            get(handlers::get_news).delete(handlers::delete_news),
        )
        .route(
            "/api/news/search/text/{fragment}",
            get(handlers::search_by_text),
        )
        .route(
            "/api/news/search/title/{fragment}",
            get(handlers::search_by_title),
        )
        // Cache administration
        .route("/api/news/cache", delete(handlers::cache_invalidate))
        .route("/api/news/cache/stats", get(handlers::cache_stats))
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
