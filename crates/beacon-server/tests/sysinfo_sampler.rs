#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;

use beacon_core::error::BeaconError;
use beacon_core::sample::Sampler;
use beacon_core::snapshot::{error_body, render_snapshot, SnapshotOptions};
use beacon_server::humanize::format_uptime;
use beacon_server::sampler::SysinfoSampler;

#[test]
fn missing_disk_path_is_a_sampler_error() {
    let sampler = SysinfoSampler::new("rust-test");
    match sampler.disk_usage(Path::new("/does/not/exist")) {
        Err(BeaconError::Sampler(msg)) => assert!(msg.starts_with("/does/not/exist"), "{msg}"),
        other => panic!("expected sampler error, got {other:?}"),
    }
}

#[test]
fn root_disk_usage_is_a_sane_percent() {
    let sampler = SysinfoSampler::new("rust-test");
    let disk = sampler.disk_usage(Path::new("/")).unwrap();
    assert!(disk.total > 0);
    assert!(disk.used + disk.free <= disk.total);
    assert!((0.0..=100.0).contains(&disk.percent), "{}", disk.percent);
}

#[test]
fn snapshot_over_bad_disk_path_renders_error_body() {
    let sampler = SysinfoSampler::new("rust-test");
    let opts = SnapshotOptions {
        disk_path: Path::new("/does/not/exist"),
        cpu_interval: None,
        runtime_version: "rust-test",
    };
    let err = render_snapshot(&sampler, opts, 0.0).expect_err("bad path must fail");
    let body = error_body(&err);
    assert!(body.starts_with("Error generating metrics: /does/not/exist"), "{body}");
    assert!(!body.contains("# TYPE"));
}

#[test]
fn uptime_formats_by_largest_unit() {
    assert_eq!(format_uptime(59.0), "0m");
    assert_eq!(format_uptime(125.0), "2m");
    assert_eq!(format_uptime((3 * 3_600 + 5 * 60) as f64), "3h 5m");
    assert_eq!(format_uptime((2 * 86_400 + 3_600 + 60) as f64), "2d 1h 1m");
    assert_eq!(format_uptime(-5.0), "0m");
}
