//! Prometheus Metrics for the news service
//!
//! - Cache operations (hits, misses, inserts, evictions, size)
//! - News service operations
//! - HTTP requests

use lazy_static::lazy_static;
use prometheus::{
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, TextEncoder,
    register_histogram_vec, register_int_counter, register_int_counter_vec, register_int_gauge,
};

lazy_static! {
    // ============================================================================
    // Cache Metrics
    // ============================================================================

    /// Cache operations by type (get, put, remove) and result
    pub static ref CACHE_OPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "news_cache_operations_total",
        "Total number of cache operations by type and result",
        &["operation", "result"]
    ).unwrap();

    /// Entries evicted to respect capacity
    pub static ref CACHE_EVICTIONS_TOTAL: IntCounter = register_int_counter!(
        "news_cache_evictions_total",
        "Total number of cache entries evicted"
    ).unwrap();

    /// Current number of cached entries
    pub static ref CACHE_ENTRIES: IntGauge = register_int_gauge!(
        "news_cache_entries",
        "Current number of entries in the news cache"
    ).unwrap();

    // ============================================================================
    // Service Metrics
    // ============================================================================

    /// News service operations by type and status
    pub static ref SERVICE_OPS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "news_service_operations_total",
        "Total number of news service operations",
        &["operation", "status"]
    ).unwrap();

    /// News service operation latency
    pub static ref SERVICE_OP_DURATION: HistogramVec = register_histogram_vec!(
        "news_service_operation_duration_seconds",
        "News service operation latency in seconds",
        &["operation"],
        vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]
    ).unwrap();

    // ============================================================================
    // HTTP Server Metrics
    // ============================================================================

    /// HTTP requests total
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "news_http_requests_total",
        "Total HTTP requests",
        &["method", "status"]
    ).unwrap();
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Force registration so every series shows up on the first scrape
pub fn init_metrics() {
    let _ = &*CACHE_OPS_TOTAL;
    let _ = &*CACHE_EVICTIONS_TOTAL;
    let _ = &*CACHE_ENTRIES;
    let _ = &*SERVICE_OPS_TOTAL;
    let _ = &*SERVICE_OP_DURATION;
    let _ = &*HTTP_REQUESTS_TOTAL;
}

/// Record cache operation
pub fn record_cache_op(operation: &str, result: &str) {
    CACHE_OPS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}

pub fn record_cache_evictions(count: usize) {
    CACHE_EVICTIONS_TOTAL.inc_by(count as u64);
}

pub fn set_cache_entries(entries: usize) {
    CACHE_ENTRIES.set(entries as i64);
}

/// Record news service operation
pub fn record_service_op(operation: &str, status: &str, duration_secs: f64) {
    SERVICE_OPS_TOTAL
        .with_label_values(&[operation, status])
        .inc();
    SERVICE_OP_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Record HTTP request
pub fn record_http_request(method: &str, status: u16) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, status.as_str()])
        .inc();
}
