//! Error boundary for handlers.
//!
//! Catches panics and responses flagged with [`InternalFailure`], logs the
//! detail, and replaces the body with the generic 500 shape. Under `/api` the
//! detail is echoed back only in debug mode.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::FutureExt;
use serde::Serialize;

use crate::app_state::AppState;

/// Marker extension carrying the detail of an unexpected failure.
#[derive(Debug, Clone)]
pub struct InternalFailure(pub String);

#[derive(Debug, Serialize)]
struct InternalBody {
    error: &'static str,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub async fn error_boundary(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    let mut resp = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(resp) => resp,
        Err(panic) => {
            let detail = panic_message(panic.as_ref());
            tracing::error!(%path, error = %detail, "handler panicked");
            return internal_response(&path, &detail, state.debug());
        }
    };

    match resp.extensions_mut().remove::<InternalFailure>() {
        Some(InternalFailure(detail)) => {
            tracing::error!(%path, error = %detail, "unhandled handler failure");
            internal_response(&path, &detail, state.debug())
        }
        None => resp,
    }
}

/// Build the generic 500 for `path`.
pub fn internal_response(path: &str, detail: &str, debug: bool) -> Response {
    let body = if path.starts_with("/api") {
        let message = if debug { detail } else { "Internal server error" };
        InternalBody {
            error: "An error occurred",
            status_code: 500,
            message: Some(message.to_string()),
        }
    } else {
        InternalBody {
            error: "Internal server error",
            status_code: 500,
            message: None,
        }
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
