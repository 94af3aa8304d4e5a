use news_server::{AppState, CacheConfig, CachePolicy, create_router};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::net::TcpListener;

/// Helper to spawn a test server
async fn spawn_test_server(algorithm: CachePolicy, capacity: usize) -> String {
    let state = AppState::from_config(&CacheConfig {
        algorithm,
        capacity,
    })
    .unwrap();
    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    url
}

async fn create(client: &Client, base_url: &str, title: &str, text: &str) -> Value {
    let res = client
        .post(format!("{}/api/news", base_url))
        .json(&json!({"title": title, "text": text, "userId": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn stats(client: &Client, base_url: &str) -> Value {
    client
        .get(format!("{}/api/news/cache/stats", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let base_url = spawn_test_server(CachePolicy::Lru, 10).await;
    let client = Client::new();

    let res = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_crud_through_cache() {
    let base_url = spawn_test_server(CachePolicy::Lru, 10).await;
    let client = Client::new();

    let created = create(&client, &base_url, "Hello", "World").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["userId"], 1);

    // Served from the cache populated by create
    let res = client
        .get(format!("{}/api/news/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["title"], "Hello");
    assert_eq!(stats(&client, &base_url).await["hits"], 1);

    let res = client
        .put(format!("{}/api/news", base_url))
        .json(&json!({"id": id, "title": "Hello again", "text": "World", "userId": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{}/api/news/{}", base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "Hello again");

    let res = client
        .delete(format!("{}/api/news/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/news/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 404);

    let stats = stats(&client, &base_url).await;
    assert_eq!(stats["entries"], 0);
    assert_eq!(stats["misses"], 1);
}

#[tokio::test]
async fn test_invalid_create_is_rejected() {
    let base_url = spawn_test_server(CachePolicy::Lfu, 10).await;
    let client = Client::new();

    let res = client
        .post(format!("{}/api/news", base_url))
        .json(&json!({"title": "", "text": "body", "userId": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let stats = stats(&client, &base_url).await;
    assert_eq!(stats["entries"], 0);
    assert_eq!(stats["inserts"], 0);
}

#[tokio::test]
async fn test_eviction_visible_in_stats() {
    let base_url = spawn_test_server(CachePolicy::Lfu, 2).await;
    let client = Client::new();

    for i in 0..3 {
        create(&client, &base_url, &format!("title {i}"), "text").await;
    }

    let stats = stats(&client, &base_url).await;
    assert_eq!(stats["policy"], "lfu");
    assert_eq!(stats["capacity"], 2);
    assert_eq!(stats["entries"], 2);
    assert_eq!(stats["evictions"], 1);
}

#[tokio::test]
async fn test_list_and_search() {
    let base_url = spawn_test_server(CachePolicy::Lru, 10).await;
    let client = Client::new();

    create(&client, &base_url, "Rust release", "notes").await;
    create(&client, &base_url, "Weather", "sunny with rust").await;
    create(&client, &base_url, "Rust tips", "borrowing").await;

    let page: Value = client
        .get(format!("{}/api/news?offset=0&limit=2", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["content"].as_array().unwrap().len(), 2);

    let by_title: Value = client
        .get(format!("{}/api/news/search/title/Rust", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_title["totalElements"], 2);

    let by_text: Value = client
        .get(format!("{}/api/news/search/text/rust", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_text["totalElements"], 1);
    assert_eq!(by_text["content"][0]["title"], "Weather");
}

#[tokio::test]
async fn test_invalidate_cache() {
    let base_url = spawn_test_server(CachePolicy::Lru, 10).await;
    let client = Client::new();

    let created = create(&client, &base_url, "Cached", "text").await;
    let id = created["id"].as_i64().unwrap();

    let res = client
        .delete(format!("{}/api/news/cache", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(stats(&client, &base_url).await["entries"], 0);

    // Store still has it; the next read repopulates
    let res = client
        .get(format!("{}/api/news/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(stats(&client, &base_url).await["entries"], 1);
}

#[tokio::test]
async fn test_zero_capacity_refuses_to_start() {
    let result = AppState::from_config(&CacheConfig {
        algorithm: CachePolicy::Lru,
        capacity: 0,
    });
    assert!(result.is_err());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let base_url = spawn_test_server(CachePolicy::Lru, 10).await;
    let client = Client::new();
    create(&client, &base_url, "Metered", "text").await;

    let body = client
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("news_cache_operations_total"));
    assert!(body.contains("news_http_requests_total"));
}
