//! Config loader (strict parsing) with environment overrides.

pub mod schema;

use std::fs;
use std::path::Path;

use beacon_core::error::{BeaconError, Result};

pub use schema::{AppConfig, SamplerSection, ServerSection, ServiceSection};

/// Default config file, used only when it exists.
pub const DEFAULT_PATH: &str = "beacon.yaml";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BeaconError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| BeaconError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the process config.
///
/// `$BEACON_CONFIG` must point at a readable file when set; otherwise
/// `beacon.yaml` is read if present and built-in defaults apply if not.
/// Environment overrides are applied last.
pub fn load() -> Result<AppConfig> {
    let mut cfg = match std::env::var("BEACON_CONFIG") {
        Ok(path) => load_from_file(&path)?,
        Err(_) if Path::new(DEFAULT_PATH).exists() => load_from_file(DEFAULT_PATH)?,
        Err(_) => AppConfig::default(),
    };
    apply_env(&mut cfg, |k| std::env::var(k).ok());
    cfg.validate()?;
    Ok(cfg)
}

/// Apply `BEACON_ENV`, `BEACON_RUNTIME_VERSION` and `BEACON_DEBUG`.
pub fn apply_env(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(env) = lookup("BEACON_ENV") {
        cfg.service.environment = env;
    }
    if let Some(v) = lookup("BEACON_RUNTIME_VERSION") {
        cfg.service.runtime_version = v;
    }
    if let Some(d) = lookup("BEACON_DEBUG") {
        let d = d.trim().to_ascii_lowercase();
        cfg.server.debug = matches!(d.as_str(), "1" | "true" | "yes" | "on");
    }
}
