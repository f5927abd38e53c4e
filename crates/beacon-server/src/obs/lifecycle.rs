//! Request lifecycle hooks.
//!
//! Outermost middleware: every response, including 404 fallbacks and 500s
//! from the error boundary, passes through here exactly once.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::app_state::AppState;

pub async fn track_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    tracing::info!(%method, %path, "request");

    let resp = next.run(req).await;

    let status = resp.status().as_u16();
    let elapsed = start.elapsed();

    // sysinfo reads /proc under a shared mutex.
    let refresh = state.clone();
    let refreshed = tokio::task::spawn_blocking(move || {
        let sampler = refresh.sampler();
        refresh.metrics().refresh_host(sampler.as_ref());
    })
    .await;
    if let Err(e) = refreshed {
        tracing::error!(%method, %path, error = %e, "host gauges not refreshed");
    }

    let metrics = state.metrics();
    if let Err(e) = metrics.record_request(method.as_str(), &path, status, elapsed) {
        tracing::error!(%method, %path, error = %e, "request metrics not recorded");
    }

    if status >= 400 {
        tracing::warn!(%method, %path, status, "request completed");
    } else {
        tracing::info!(%method, %path, status, "request completed");
    }
    resp
}
