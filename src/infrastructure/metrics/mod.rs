//! Prometheus Metrics Module
//!
//! # Metrics Collected
//! - HTTP request counts by method, route, and status
//! - HTTP request latency histograms
//! - Server listings by response shape
//! - Stored file deletions and cleanup failures

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "chat_community";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, route, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Server listings served, by response shape ("plain", "with_member_count")
pub static SERVER_LISTINGS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("server_listings_total", "Server listings served").namespace(NAMESPACE),
        &["shape"],
    )
    .expect("Failed to create SERVER_LISTINGS_TOTAL metric")
});

/// Files removed from storage after being superseded or orphaned
pub static STORED_FILES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("stored_files_deleted_total", "Stored files deleted").namespace(NAMESPACE),
    )
    .expect("Failed to create STORED_FILES_DELETED_TOTAL metric")
});

/// Best-effort file deletions that failed
pub static FILE_CLEANUP_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("file_cleanup_failures_total", "Stored file deletions that failed")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create FILE_CLEANUP_FAILURES_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(SERVER_LISTINGS_TOTAL.clone()))
        .expect("Failed to register SERVER_LISTINGS_TOTAL");
    registry
        .register(Box::new(STORED_FILES_DELETED_TOTAL.clone()))
        .expect("Failed to register STORED_FILES_DELETED_TOTAL");
    registry
        .register(Box::new(FILE_CLEANUP_FAILURES_TOTAL.clone()))
        .expect("Failed to register FILE_CLEANUP_FAILURES_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record a served server listing
pub fn record_server_listing(with_member_count: bool) {
    let shape = if with_member_count { "with_member_count" } else { "plain" };
    SERVER_LISTINGS_TOTAL.with_label_values(&[shape]).inc();
}

/// Helper to record the outcome of one stored-file deletion
pub fn record_file_cleanup(success: bool) {
    if success {
        STORED_FILES_DELETED_TOTAL.inc();
    } else {
        FILE_CLEANUP_FAILURES_TOTAL.inc();
    }
}
