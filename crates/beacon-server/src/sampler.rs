//! `sysinfo`-backed host sampler.
//!
//! One long-lived `System` serves the cheap queries (CPU since last call,
//! memory, process). Windowed CPU reads build a private `System` so the sleep
//! never holds the shared lock. Disk figures come from `statvfs` on unix.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};

use beacon_core::error::{BeaconError, Result};
use beacon_core::sample::{percent, DiskUsage, MemoryStats, PlatformInfo, ProcessStats, Sampler};

pub struct SysinfoSampler {
    sys: Mutex<System>,
    runtime_version: String,
}

impl SysinfoSampler {
    pub fn new(runtime_version: impl Into<String>) -> Self {
        let mut sys = System::new();
        // Baseline so the first `cpu_percent(None)` has something to diff against.
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            sys: Mutex::new(sys),
            runtime_version: runtime_version.into(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, System> {
        match self.sys.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("sampler mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl Sampler for SysinfoSampler {
    fn cpu_percent(&self, interval: Option<Duration>) -> Result<f32> {
        let usage = match interval {
            None => {
                let mut sys = self.lock();
                sys.refresh_cpu_usage();
                sys.global_cpu_info().cpu_usage()
            }
            Some(window) => {
                let mut sys = System::new();
                sys.refresh_cpu_usage();
                std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
                sys.refresh_cpu_usage();
                sys.global_cpu_info().cpu_usage()
            }
        };
        if !usage.is_finite() {
            return Err(BeaconError::Sampler("cpu usage unavailable".into()));
        }
        Ok(usage)
    }

    fn memory(&self) -> Result<MemoryStats> {
        let mut sys = self.lock();
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(BeaconError::Sampler("memory totals unavailable".into()));
        }
        let available = sys.available_memory();
        Ok(MemoryStats {
            total,
            used: sys.used_memory(),
            available,
            percent: percent(total.saturating_sub(available), total),
        })
    }

    fn disk_usage(&self, path: &Path) -> Result<DiskUsage> {
        let target = path
            .canonicalize()
            .map_err(|e| BeaconError::Sampler(format!("{}: {e}", path.display())))?;
        fs_totals(&target)
    }

    fn boot_time(&self) -> Result<u64> {
        match System::boot_time() {
            0 => Err(BeaconError::Sampler("boot time unavailable".into())),
            t => Ok(t),
        }
    }

    fn hostname(&self) -> Result<String> {
        System::host_name().ok_or_else(|| BeaconError::Sampler("hostname unavailable".into()))
    }

    fn cpu_count(&self) -> usize {
        let n = self.lock().cpus().len();
        if n > 0 {
            return n;
        }
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            system: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            release: System::kernel_version().unwrap_or_else(|| "unknown".into()),
            node: System::host_name().unwrap_or_default(),
            runtime_version: self.runtime_version.clone(),
        }
    }

    fn process(&self) -> Result<ProcessStats> {
        let pid = sysinfo::get_current_pid().map_err(|e| BeaconError::Sampler(e.to_string()))?;
        let mut sys = self.lock();
        sys.refresh_process(pid);
        let proc_ = sys
            .process(pid)
            .ok_or_else(|| BeaconError::Sampler(format!("process {pid} not found")))?;
        Ok(ProcessStats {
            resident_bytes: proc_.memory(),
            virtual_bytes: proc_.virtual_memory(),
            start_time_seconds: proc_.start_time(),
        })
    }
}

/// `statvfs` on the path itself, so the figures match `df` including the
/// root-reserved split.
#[cfg(unix)]
fn fs_totals(path: &Path) -> Result<DiskUsage> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| BeaconError::Sampler(format!("{}: {e}", path.display())))?;
    let mut st = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: `c_path` is NUL-terminated and `st` is only read after success.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), st.as_mut_ptr()) };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        return Err(BeaconError::Sampler(format!("{}: {err}", path.display())));
    }
    let st = unsafe { st.assume_init() };

    let frsize = st.f_frsize as u64;
    Ok(DiskUsage::from_totals(
        st.f_blocks as u64 * frsize,
        st.f_bfree as u64 * frsize,
        st.f_bavail as u64 * frsize,
    ))
}

/// Without `statvfs` the reserved split is unknown; treat it as zero.
#[cfg(not(unix))]
fn fs_totals(path: &Path) -> Result<DiskUsage> {
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .ok_or_else(|| {
            BeaconError::Sampler(format!("no filesystem found for {}", path.display()))
        })?;
    let available = disk.available_space();
    Ok(DiskUsage::from_totals(disk.total_space(), available, available))
}
