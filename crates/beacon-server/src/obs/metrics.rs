//! Application metric families.
//!
//! Built on the core registry; the families are kept as handles so the
//! per-request path skips name lookups.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use beacon_core::error::Result;
use beacon_core::metrics::exposition;
use beacon_core::metrics::{Counter, Family, Gauge, Histogram, Registry};
use beacon_core::sample::{ProcessStats, Sampler};

pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_LATENCY: &str = "http_request_duration_seconds";
pub const CPU_USAGE: &str = "app_cpu_usage_percent";
pub const MEMORY_USAGE: &str = "app_memory_usage_mb";
pub const ACTIVE_USERS: &str = "app_active_users";

pub struct AppMetrics {
    registry: Registry,
    pub http_requests: Arc<Family<Counter>>,
    pub http_latency: Arc<Family<Histogram>>,
    pub cpu_usage: Arc<Gauge>,
    pub memory_usage_mb: Arc<Gauge>,
    /// Placeholder: a uniformly random value in 1..=100 on every request.
    /// It does not count anything.
    pub active_users: Arc<Gauge>,
}

impl AppMetrics {
    pub fn new() -> Result<Self> {
        let mut registry = Registry::new();
        let http_requests = registry.register_counter(
            HTTP_REQUESTS,
            "Total HTTP Requests",
            &["method", "endpoint", "status_code"],
        )?;
        let http_latency =
            registry.register_histogram(HTTP_LATENCY, "HTTP request latency", &["endpoint"])?;
        let cpu_usage = registry
            .register_gauge(CPU_USAGE, "CPU usage percentage", &[])?
            .get()?;
        let memory_usage_mb = registry
            .register_gauge(MEMORY_USAGE, "Memory usage in MB", &[])?
            .get()?;
        let active_users = registry
            .register_gauge(ACTIVE_USERS, "Active users count", &[])?
            .get()?;

        Ok(Self {
            registry,
            http_requests,
            http_latency,
            cpu_usage,
            memory_usage_mb,
            active_users,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Count one completed request and record its latency.
    pub fn record_request(
        &self,
        method: &str,
        path: &str,
        status: u16,
        elapsed: Duration,
    ) -> Result<()> {
        self.http_latency.with_label_values(&[path])?.observe(elapsed);
        self.http_requests
            .with_label_values(&[method, path, &status.to_string()])?
            .inc();
        Ok(())
    }

    /// Resample the host gauges. Sampler failures leave the previous value.
    pub fn refresh_host(&self, sampler: &dyn Sampler) {
        match sampler.cpu_percent(None) {
            Ok(cpu) => self.cpu_usage.set(cpu as f64),
            Err(e) => tracing::debug!(error = %e, "cpu gauge not refreshed"),
        }
        match sampler.memory() {
            Ok(m) => self.memory_usage_mb.set(m.used as f64 / 1024.0 / 1024.0),
            Err(e) => tracing::debug!(error = %e, "memory gauge not refreshed"),
        }
        self.active_users.set(rand::rng().random_range(1..=100u32) as f64);
    }

    /// Registry exposition, followed by process gauges when available.
    pub fn render(&self, process: Option<&ProcessStats>) -> String {
        let out = self.registry.render();
        match process {
            Some(p) => exposition::append_process(out, p),
            None => out,
        }
    }
}
