//! JSON and text endpoints.
//!
//! - `/health`           : liveness with service identity
//! - `/info`             : host summary
//! - `/metrics`          : registry exposition
//! - `/api/system-info`  : host snapshot as JSON
//! - `/api/metrics`      : ad hoc host exposition
//! - fallback            : structured 404

pub mod api;
pub mod system;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::humanize::unix_now;

pub const TEXT_EXPOSITION: &str = "text/plain; version=0.0.4; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: f64,
    pub service: String,
    pub version: &'static str,
}

/// `python_version` keeps its historical wire name; it carries the configured
/// runtime version string.
#[derive(Debug, Serialize)]
pub struct InfoBody {
    pub hostname: String,
    pub python_version: String,
    pub environment: String,
    pub cpu_usage: String,
    pub memory_usage: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: &'static str,
    pub status_code: u16,
    pub path: String,
    pub message: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy",
        timestamp: unix_now(),
        service: state.cfg().service.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn info(State(state): State<AppState>) -> Result<Json<InfoBody>, ApiError> {
    let sampler = state.sampler();
    let (hostname, cpu, memory) = tokio::task::spawn_blocking(move || {
        (sampler.hostname(), sampler.cpu_percent(None), sampler.memory())
    })
    .await?;

    let hostname = hostname.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "hostname lookup failed");
        "Error".to_string()
    });
    let cpu_usage = match cpu {
        Ok(c) => format!("{}%", system::round1(c as f64)),
        Err(e) => {
            tracing::warn!(error = %e, "cpu sampling failed");
            "0%".to_string()
        }
    };
    let memory_usage = match memory {
        Ok(m) => format!("{}%", m.percent),
        Err(e) => {
            tracing::warn!(error = %e, "memory sampling failed");
            "0%".to_string()
        }
    };

    let svc = &state.cfg().service;
    Ok(Json(InfoBody {
        hostname,
        python_version: svc.runtime_version.clone(),
        environment: svc.environment.clone(),
        cpu_usage,
        memory_usage,
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let sampler = state.sampler();
    let process = match tokio::task::spawn_blocking(move || sampler.process()).await? {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::debug!(error = %e, "process gauges skipped");
            None
        }
    };
    let body = state.metrics().render(process.as_ref());

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, TEXT_EXPOSITION)], body).into_response())
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::warn!(path = %uri.path(), "404 Not Found");
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "Not found",
            status_code: 404,
            path: uri.path().to_string(),
            message: "The requested resource was not found",
        }),
    )
}
