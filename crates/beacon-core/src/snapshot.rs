//! Ad hoc host exposition computed straight from a [`Sampler`].
//!
//! Independent of the registry: every call samples afresh and writes a fixed
//! list of label-less gauges (plus the `python_info` marker). All readings are
//! taken before anything is written, so a sampler failure yields an error and
//! never a partial document.

use std::path::Path;
use std::time::Duration;

use crate::error::{BeaconError, Result};
use crate::metrics::exposition::TextWriter;
use crate::metrics::MetricKind;
use crate::sample::Sampler;

/// Inputs for one snapshot render.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotOptions<'a> {
    pub disk_path: &'a Path,
    pub cpu_interval: Option<Duration>,
    /// Reported on the `python_info` marker line.
    pub runtime_version: &'a str,
}

/// Sample the host and render the snapshot document.
pub fn render_snapshot(
    sampler: &dyn Sampler,
    opts: SnapshotOptions<'_>,
    now_unix: f64,
) -> Result<String> {
    let memory = sampler.memory()?;
    let disk = sampler.disk_usage(opts.disk_path)?;
    let cpu = sampler.cpu_percent(opts.cpu_interval)?;
    let boot = sampler.boot_time()?;

    let mut w = TextWriter::new();
    w.header("python_info", "Python platform information", MetricKind::Gauge);
    w.sample("python_info", &[("version", opts.runtime_version)], "1");
    w.gauge("cpu_usage_total", "Total CPU usage percent", round1(cpu as f64));
    w.gauge("memory_usage_percent", "Memory usage percent", memory.percent);
    w.gauge("memory_available_bytes", "Available memory in bytes", memory.available as f64);
    w.gauge("memory_total_bytes", "Total memory in bytes", memory.total as f64);
    w.gauge("disk_usage_percent", "Disk usage percent", disk.percent);
    w.gauge("service_health", "Service health status", 1.0);
    w.gauge(
        "system_uptime_seconds",
        "System uptime in seconds",
        uptime_seconds(boot, now_unix),
    );
    Ok(w.finish())
}

/// Body substituted for the whole document when sampling fails.
pub fn error_body(err: &BeaconError) -> String {
    format!("Error generating metrics: {}", err.detail())
}

/// Seconds since `boot`, clamped at zero.
pub fn uptime_seconds(boot: u64, now_unix: f64) -> f64 {
    (now_unix - boot as f64).max(0.0)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
