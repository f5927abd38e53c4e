//! Host sampling contract.
//!
//! Every call re-queries the OS; nothing here caches values. Implementations
//! may block (`cpu_percent(Some(_))` sleeps for the window), so async callers
//! should run them on a blocking worker.

use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Virtual memory totals in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    /// `(total - available) / total * 100`, one decimal.
    pub percent: f64,
}

/// Usage of the filesystem containing a path, in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    /// Space available to unprivileged users.
    pub free: u64,
    /// `used / (used + free) * 100`, one decimal. Root-reserved blocks count
    /// as neither.
    pub percent: f64,
}

impl DiskUsage {
    /// Build from filesystem totals: `unreserved_free` includes root-reserved
    /// blocks, `available` does not.
    pub fn from_totals(total: u64, unreserved_free: u64, available: u64) -> Self {
        let used = total.saturating_sub(unreserved_free);
        Self {
            total,
            used,
            free: available,
            percent: percent(used, used.saturating_add(available)),
        }
    }
}

/// Static-ish identifiers of the host and runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub system: String,
    pub release: String,
    pub node: String,
    pub runtime_version: String,
}

impl PlatformInfo {
    /// `"<system> <release>"`.
    pub fn platform(&self) -> String {
        format!("{} {}", self.system, self.release)
    }
}

/// Figures for the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
    pub start_time_seconds: u64,
}

/// Point-in-time host queries.
pub trait Sampler: Send + Sync {
    /// Global CPU usage in percent.
    ///
    /// `None` reports usage since the previous call; `Some(window)` blocks the
    /// calling thread for `window` and reports the average over it.
    fn cpu_percent(&self, interval: Option<Duration>) -> Result<f32>;

    fn memory(&self) -> Result<MemoryStats>;

    fn disk_usage(&self, path: &Path) -> Result<DiskUsage>;

    /// Boot time as unix seconds.
    fn boot_time(&self) -> Result<u64>;

    fn hostname(&self) -> Result<String>;

    fn cpu_count(&self) -> usize;

    fn platform_info(&self) -> PlatformInfo;

    fn process(&self) -> Result<ProcessStats>;
}

/// `part / whole * 100` rounded to one decimal; `0.0` when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let p = part as f64 / whole as f64 * 100.0;
    (p * 10.0).round() / 10.0
}
