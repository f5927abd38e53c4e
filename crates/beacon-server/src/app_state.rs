//! Shared application state for the beacon server.
//!
//! Constructed once at startup and cloned into every handler; the metric
//! registry and sampler are the only shared resources.

use std::sync::Arc;

use beacon_core::error::Result;
use beacon_core::sample::Sampler;

use crate::config::AppConfig;
use crate::obs::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    sampler: Arc<dyn Sampler>,
}

struct AppStateInner {
    cfg: AppConfig,
    metrics: AppMetrics,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: AppConfig, sampler: Arc<dyn Sampler>) -> Result<Self> {
        let metrics = AppMetrics::new()?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics }),
            sampler,
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.inner.metrics
    }

    pub fn sampler(&self) -> Arc<dyn Sampler> {
        Arc::clone(&self.sampler)
    }

    pub fn debug(&self) -> bool {
        self.inner.cfg.server.debug
    }
}
