//! Host snapshot shared by `/api/system-info` and the system-info page.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use beacon_core::error::{BeaconError, Result};
use beacon_core::sample::Sampler;
use beacon_core::snapshot::uptime_seconds;

use crate::humanize::{format_timestamp, format_uptime, unix_now};

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub cpu_cores: usize,
    /// GiB, two decimals.
    pub total_memory: f64,
    pub cpu_usage: String,
    pub memory_usage: String,
    pub disk_usage: String,
    pub uptime: String,
    pub timestamp: String,
}

impl SystemInfo {
    /// Values shown when sampling failed.
    pub fn fallback(err: &BeaconError) -> Self {
        Self {
            hostname: "Error".to_string(),
            platform: format!("Error: {}", err.detail()),
            cpu_cores: 0,
            total_memory: 0.0,
            cpu_usage: "0%".to_string(),
            memory_usage: "0%".to_string(),
            disk_usage: "0%".to_string(),
            uptime: "0m".to_string(),
            timestamp: format_timestamp(unix_now()),
        }
    }
}

/// Sample the host. Blocks for `cpu_interval` when set.
pub fn collect(
    sampler: &dyn Sampler,
    disk_path: &Path,
    cpu_interval: Option<Duration>,
) -> Result<SystemInfo> {
    let memory = sampler.memory()?;
    let disk = sampler.disk_usage(disk_path)?;
    let platform = sampler.platform_info();
    let cpu = sampler.cpu_percent(cpu_interval)?;
    let boot = sampler.boot_time()?;
    let now = unix_now();

    Ok(SystemInfo {
        hostname: platform.node.clone(),
        platform: platform.platform(),
        cpu_cores: sampler.cpu_count(),
        total_memory: round2(memory.total as f64 / (1024.0 * 1024.0 * 1024.0)),
        cpu_usage: format!("{}%", round1(cpu as f64)),
        memory_usage: format!("{}%", memory.percent),
        disk_usage: format!("{}%", disk.percent),
        uptime: format_uptime(uptime_seconds(boot, now)),
        timestamp: format_timestamp(now),
    })
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
