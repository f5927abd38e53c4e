#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::http::StatusCode;

use beacon_server::pages::quotes::QUOTES;
use common::{app, content_type, get, get_json};

#[tokio::test]
async fn health_is_healthy_with_non_decreasing_timestamp() {
    let (_, app) = app(false);

    let mut last = 0.0;
    for _ in 0..3 {
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "beacon");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        let ts = body["timestamp"].as_f64().expect("numeric timestamp");
        assert!(ts >= last);
        last = ts;
    }
}

#[tokio::test]
async fn info_reports_host_summary() {
    let (_, app) = app(false);
    let (status, body) = get_json(&app, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hostname"], "test-host");
    assert_eq!(body["python_version"], "rust-test");
    assert_eq!(body["environment"], "production");
    assert_eq!(body["cpu_usage"], "12.5%");
    assert_eq!(body["memory_usage"], "25%");
}

#[tokio::test]
async fn info_falls_back_when_sampler_fails() {
    let (_, app) = app(true);
    let (status, body) = get_json(&app, "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hostname"], "Error");
    assert_eq!(body["cpu_usage"], "0%");
}

#[tokio::test]
async fn home_page_shows_a_known_quote() {
    let (_, app) = app(false);
    let (status, headers, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("text/html"));
    assert!(body.contains("test-host"));
    assert!(QUOTES.iter().any(|q| body.contains(&q.replace('\'', "&#39;"))));
}

#[tokio::test]
async fn health_page_renders() {
    let (_, app) = app(false);
    let (status, _, body) = get(&app, "/health-page").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Health Check"));
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn api_system_info_returns_snapshot() {
    let (_, app) = app(false);
    let (status, body) = get_json(&app, "/api/system-info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hostname"], "test-host");
    assert_eq!(body["platform"], "Linux 6.1.0");
    assert_eq!(body["cpu_cores"], 4);
    assert_eq!(body["total_memory"], 8.0);
    assert_eq!(body["cpu_usage"], "12.5%");
    assert_eq!(body["memory_usage"], "25%");
    assert_eq!(body["disk_usage"], "40%");
    assert!(body["uptime"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn api_system_info_failure_is_json_500() {
    let (_, app) = app(true);
    let (status, body) = get_json(&app, "/api/system-info").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "memory unavailable");
}

#[tokio::test]
async fn system_info_page_uses_fallback_values() {
    let (_, app) = app(true);
    let (status, _, body) = get(&app, "/system-info-page").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: memory unavailable"));
}

#[tokio::test]
async fn api_metrics_is_plain_text_snapshot() {
    let (_, app) = app(false);
    let (status, headers, body) = get(&app, "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type(&headers), "text/plain; charset=utf-8");
    assert!(body.contains("# TYPE cpu_usage_total gauge\ncpu_usage_total 12.5\n"));
    assert!(body.contains("python_info{version=\"rust-test\"} 1\n"));
    assert!(body.contains("service_health 1\n"));
}

#[tokio::test]
async fn api_metrics_failure_replaces_whole_body() {
    let (_, app) = app(true);
    let (status, headers, body) = get(&app, "/api/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type(&headers).starts_with("text/plain"));
    assert_eq!(body, "Error generating metrics: memory unavailable");
}

#[tokio::test]
async fn metrics_page_survives_sampler_failure() {
    let (_, app) = app(true);
    let (status, _, body) = get(&app, "/metrics-page").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error generating metrics: memory unavailable"));
}

#[tokio::test]
async fn unknown_path_is_structured_404() {
    let (_, app) = app(false);
    let (status, body) = get_json(&app, "/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["path"], "/does-not-exist");
    assert_eq!(body["message"], "The requested resource was not found");
}
