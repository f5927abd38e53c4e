//! beacon server binary.
//!
//! Loads config, installs the tracing subscriber, and serves until Ctrl+C or
//! SIGTERM.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use beacon_core::error::{BeaconError, Result};
use beacon_server::{app_state::AppState, config, router, sampler::SysinfoSampler};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;

    let sampler = Arc::new(SysinfoSampler::new(cfg.service.runtime_version.clone()));
    let state = AppState::new(cfg, sampler)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "beacon starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| BeaconError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BeaconError::Internal(format!("server failed: {e}")))?;

    tracing::info!("beacon stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
