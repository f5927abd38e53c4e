use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use beacon_core::error::{BeaconError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub sampler: SamplerSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            service: ServiceSection::default(),
            sampler: SamplerSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BeaconError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.service.validate()?;
        self.sampler.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Expose failure details in `/api` error bodies.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            debug: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            BeaconError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_runtime_version")]
    pub runtime_version: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            environment: default_environment(),
            runtime_version: default_runtime_version(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BeaconError::Config("service.name must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    /// Filesystem reported as disk usage.
    #[serde(default = "default_disk_path")]
    pub disk_path: PathBuf,

    /// CPU averaging window for the system-info page and API. 0 = no window.
    #[serde(default = "default_page_cpu_interval_ms")]
    pub page_cpu_interval_ms: u64,

    /// CPU averaging window for the snapshot exposition. 0 = no window.
    #[serde(default = "default_metrics_cpu_interval_ms")]
    pub metrics_cpu_interval_ms: u64,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            disk_path: default_disk_path(),
            page_cpu_interval_ms: default_page_cpu_interval_ms(),
            metrics_cpu_interval_ms: default_metrics_cpu_interval_ms(),
        }
    }
}

impl SamplerSection {
    pub fn validate(&self) -> Result<()> {
        if self.page_cpu_interval_ms > 5000 {
            return Err(BeaconError::Config(
                "sampler.page_cpu_interval_ms must be between 0 and 5000".into(),
            ));
        }
        if self.metrics_cpu_interval_ms > 5000 {
            return Err(BeaconError::Config(
                "sampler.metrics_cpu_interval_ms must be between 0 and 5000".into(),
            ));
        }
        Ok(())
    }

    pub fn page_cpu_interval(&self) -> Option<Duration> {
        window(self.page_cpu_interval_ms)
    }

    pub fn metrics_cpu_interval(&self) -> Option<Duration> {
        window(self.metrics_cpu_interval_ms)
    }
}

fn window(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_service_name() -> String {
    "beacon".into()
}
fn default_environment() -> String {
    "production".into()
}
fn default_runtime_version() -> String {
    format!("rust-{}", env!("CARGO_PKG_RUST_VERSION"))
}
fn default_disk_path() -> PathBuf {
    PathBuf::from("/")
}
fn default_page_cpu_interval_ms() -> u64 {
    1000
}
fn default_metrics_cpu_interval_ms() -> u64 {
    500
}
