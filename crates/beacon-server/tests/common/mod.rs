//! Shared fixtures: a scriptable sampler and in-process request helpers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use beacon_core::error::{BeaconError, Result};
use beacon_core::sample::{DiskUsage, MemoryStats, PlatformInfo, ProcessStats, Sampler};
use beacon_server::{app_state::AppState, config::AppConfig, router};

/// Sampler returning fixed values; `failing` makes every fallible query fail.
/// Records the thread each `cpu_percent` and `process` call ran on.
#[derive(Default)]
pub struct FakeSampler {
    pub failing: bool,
    pub sampled_on: Mutex<Vec<ThreadId>>,
}

impl FakeSampler {
    pub fn new(failing: bool) -> Self {
        Self { failing, ..Self::default() }
    }

    fn check(&self, what: &str) -> Result<()> {
        if self.failing {
            return Err(BeaconError::Sampler(format!("{what} unavailable")));
        }
        Ok(())
    }
}

impl Sampler for FakeSampler {
    fn cpu_percent(&self, _interval: Option<Duration>) -> Result<f32> {
        self.sampled_on.lock().unwrap().push(thread::current().id());
        self.check("cpu")?;
        Ok(12.5)
    }
    fn memory(&self) -> Result<MemoryStats> {
        self.check("memory")?;
        Ok(MemoryStats {
            total: 8 * 1024 * 1024 * 1024,
            used: 2 * 1024 * 1024 * 1024,
            available: 6 * 1024 * 1024 * 1024,
            percent: 25.0,
        })
    }
    fn disk_usage(&self, _path: &Path) -> Result<DiskUsage> {
        self.check("disk")?;
        Ok(DiskUsage { total: 100, used: 40, free: 60, percent: 40.0 })
    }
    fn boot_time(&self) -> Result<u64> {
        self.check("boot time")?;
        Ok(1_700_000_000)
    }
    fn hostname(&self) -> Result<String> {
        self.check("hostname")?;
        Ok("test-host".into())
    }
    fn cpu_count(&self) -> usize {
        4
    }
    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            system: "Linux".into(),
            release: "6.1.0".into(),
            node: "test-host".into(),
            runtime_version: "rust-test".into(),
        }
    }
    fn process(&self) -> Result<ProcessStats> {
        self.sampled_on.lock().unwrap().push(thread::current().id());
        self.check("process")?;
        Ok(ProcessStats {
            resident_bytes: 1 << 20,
            virtual_bytes: 1 << 24,
            start_time_seconds: 1_700_000_100,
        })
    }
}

pub fn state_with(failing: bool, debug: bool) -> AppState {
    state_with_sampler(Arc::new(FakeSampler::new(failing)), debug)
}

pub fn state_with_sampler(sampler: Arc<FakeSampler>, debug: bool) -> AppState {
    let mut cfg = AppConfig::default();
    cfg.server.debug = debug;
    cfg.service.runtime_version = "rust-test".into();
    AppState::new(cfg, sampler).expect("state")
}

pub fn app(failing: bool) -> (AppState, Router) {
    let state = state_with(failing, false);
    let app = router::build_router(state.clone());
    (state, app)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, HeaderMap, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(app, path).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

pub fn content_type(headers: &HeaderMap) -> &str {
    headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("")
}
