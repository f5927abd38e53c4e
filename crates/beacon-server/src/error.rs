//! HTTP mapping for unexpected handler failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use beacon_core::error::BeaconError;

use crate::obs::boundary::InternalFailure;

/// Failures a handler does not recover from itself.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] BeaconError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Body is provisional; the error boundary rewrites it using the
        // attached failure.
        let mut resp = (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error",
                "status_code": 500,
            })),
        )
            .into_response();
        resp.extensions_mut().insert(InternalFailure(self.to_string()));
        resp
    }
}
