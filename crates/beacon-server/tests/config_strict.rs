#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use beacon_server::config::{self, AppConfig};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:5000"
sampler:
  disk_pth: "/" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
    assert!(!cfg.server.debug);
    assert_eq!(cfg.service.environment, "production");
    assert_eq!(cfg.sampler.page_cpu_interval(), Some(Duration::from_millis(1000)));
    assert_eq!(cfg.sampler.metrics_cpu_interval(), Some(Duration::from_millis(500)));
}

#[test]
fn unsupported_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_and_interval_rejected() {
    assert!(config::load_from_str("version: 1\nserver:\n  listen: \"nowhere\"\n").is_err());
    let too_long = "version: 1\nsampler:\n  page_cpu_interval_ms: 60000\n";
    assert!(config::load_from_str(too_long).is_err());
}

#[test]
fn zero_interval_means_no_window() {
    let yaml = "version: 1\nsampler:\n  metrics_cpu_interval_ms: 0\n";
    let cfg = config::load_from_str(yaml).unwrap();
    assert_eq!(cfg.sampler.metrics_cpu_interval(), None);
}

#[test]
fn env_overrides_apply() {
    let mut cfg = AppConfig::default();
    config::apply_env(&mut cfg, |k| match k {
        "BEACON_ENV" => Some("staging".to_string()),
        "BEACON_RUNTIME_VERSION" => Some("rust-1.80".to_string()),
        "BEACON_DEBUG" => Some("true".to_string()),
        _ => None,
    });
    assert_eq!(cfg.service.environment, "staging");
    assert_eq!(cfg.service.runtime_version, "rust-1.80");
    assert!(cfg.server.debug);
}
