//! Axum router wiring.
//!
//! Layering, outermost first: lifecycle hooks, error boundary, routes. The
//! 404 fallback sits behind both layers so it is counted and logged like any
//! other response.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops, pages};

pub fn build_router(state: AppState) -> Router {
    with_layers(routes(), state)
}

/// All application routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(ops::health))
        .route("/info", get(ops::info))
        .route("/metrics", get(ops::metrics))
        .route("/health-page", get(pages::health_page))
        .route("/system-info-page", get(pages::system_info_page))
        .route("/metrics-page", get(pages::metrics_page))
        .route("/api/system-info", get(ops::api::system_info))
        .route("/api/metrics", get(ops::api::metrics))
        .fallback(ops::not_found)
}

/// Attach the error boundary and lifecycle hooks to `routes`.
pub fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(state.clone(), obs::boundary::error_boundary))
        .layer(middleware::from_fn_with_state(state.clone(), obs::lifecycle::track_request))
        .with_state(state)
}
