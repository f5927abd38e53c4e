//! `/api/*` endpoints backing dynamic page updates.
//!
//! Sampler failures surface as 500s with a JSON or text body; they are not
//! routed through the error boundary.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use beacon_core::snapshot::{error_body, render_snapshot, SnapshotOptions};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::humanize::unix_now;
use crate::ops::{system, TEXT_PLAIN};

pub async fn system_info(State(state): State<AppState>) -> Result<Response, ApiError> {
    let sampler = state.sampler();
    let cfg = state.cfg().sampler.clone();
    let result = tokio::task::spawn_blocking(move || {
        system::collect(sampler.as_ref(), &cfg.disk_path, cfg.page_cpu_interval())
    })
    .await?;

    Ok(match result {
        Ok(info) => Json(info).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "system info sampling failed");
            let body = Json(json!({ "error": e.detail() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    })
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let result = snapshot(&state).await?;

    Ok(match result {
        Ok(text) => (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response(),
        Err(body) => (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, TEXT_PLAIN)], body)
            .into_response(),
    })
}

/// Render the ad hoc exposition on a blocking worker.
///
/// The inner `Err` is the complete error body to show instead of the document.
pub async fn snapshot(state: &AppState) -> Result<Result<String, String>, ApiError> {
    let sampler = state.sampler();
    let cfg = state.cfg().sampler.clone();
    let runtime_version = state.cfg().service.runtime_version.clone();

    let rendered = tokio::task::spawn_blocking(move || {
        let opts = SnapshotOptions {
            disk_path: &cfg.disk_path,
            cpu_interval: cfg.metrics_cpu_interval(),
            runtime_version: &runtime_version,
        };
        render_snapshot(sampler.as_ref(), opts, unix_now())
    })
    .await?;

    Ok(rendered.map_err(|e| {
        tracing::error!(error = %e, "snapshot metrics failed");
        error_body(&e)
    }))
}
