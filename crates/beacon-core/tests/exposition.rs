#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use beacon_core::metrics::exposition::{append_process, format_value};
use beacon_core::metrics::Registry;
use beacon_core::sample::ProcessStats;

#[test]
fn zero_label_metric_has_no_braces() {
    let mut r = Registry::new();
    r.register_gauge("app_cpu_usage_percent", "CPU usage percentage", &[]).unwrap();
    r.gauge("app_cpu_usage_percent").unwrap().set(12.5);

    let text = r.render();
    assert_eq!(
        text,
        "# HELP app_cpu_usage_percent CPU usage percentage\n\
         # TYPE app_cpu_usage_percent gauge\n\
         app_cpu_usage_percent 12.5\n"
    );
}

#[test]
fn labels_follow_declared_order_and_series_first_seen_order() {
    let mut r = Registry::new();
    r.register_counter(
        "http_requests_total",
        "Total HTTP Requests",
        &["method", "endpoint", "status_code"],
    )
    .unwrap();
    r.counter("http_requests_total", &["GET", "/z", "200"]).unwrap().inc();
    r.counter("http_requests_total", &["GET", "/a", "404"]).unwrap().inc();
    r.counter("http_requests_total", &["GET", "/z", "200"]).unwrap().inc();

    let text = r.render();
    let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        lines,
        vec![
            r#"http_requests_total{method="GET",endpoint="/z",status_code="200"} 2"#,
            r#"http_requests_total{method="GET",endpoint="/a",status_code="404"} 1"#,
        ]
    );
}

#[test]
fn families_render_in_registration_order_with_one_type_line_each() {
    let mut r = Registry::new();
    r.register_counter("b_total", "second letter first", &[]).unwrap();
    r.register_gauge("a_value", "first letter second", &[]).unwrap();
    r.counter("b_total", &[]).unwrap().inc();
    r.gauge("a_value").unwrap().set(1.0);

    let text = r.render();
    let types: Vec<&str> = text.lines().filter(|l| l.starts_with("# TYPE")).collect();
    assert_eq!(types, vec!["# TYPE b_total counter", "# TYPE a_value gauge"]);
    assert!(text.contains("b_total 1\n\n# HELP a_value"));
}

#[test]
fn histogram_renders_buckets_sum_and_count() {
    let mut r = Registry::new();
    r.register_histogram("http_request_duration_seconds", "HTTP request latency", &["endpoint"])
        .unwrap();
    r.histogram("http_request_duration_seconds", &["/health"])
        .unwrap()
        .observe(Duration::from_millis(20));

    let text = r.render();
    assert!(text.contains("# TYPE http_request_duration_seconds histogram\n"));
    for line in [
        r#"http_request_duration_seconds_bucket{endpoint="/health",le="0.01"} 0"#,
        r#"http_request_duration_seconds_bucket{endpoint="/health",le="0.025"} 1"#,
        r#"http_request_duration_seconds_bucket{endpoint="/health",le="+Inf"} 1"#,
    ] {
        assert!(text.contains(line), "{line}");
    }
    assert!(text.contains(r#"http_request_duration_seconds_sum{endpoint="/health"} 0.02"#));
    assert!(text.contains(r#"http_request_duration_seconds_count{endpoint="/health"} 1"#));
}

#[test]
fn label_values_and_help_are_escaped() {
    let mut r = Registry::new();
    r.register_counter("odd_total", "line one\nline two", &["path"]).unwrap();
    r.counter("odd_total", &["/a\"b\\c"]).unwrap().inc();

    let text = r.render();
    assert!(text.contains("# HELP odd_total line one\\nline two\n"));
    assert!(text.contains(r#"odd_total{path="/a\"b\\c"} 1"#));
}

#[test]
fn family_without_series_still_has_header() {
    let mut r = Registry::new();
    r.register_counter("idle_total", "never touched", &["k"]).unwrap();
    assert_eq!(r.render(), "# HELP idle_total never touched\n# TYPE idle_total counter\n");
}

#[test]
fn special_values_use_exposition_spelling() {
    assert_eq!(format_value(f64::NAN), "NaN");
    assert_eq!(format_value(f64::INFINITY), "+Inf");
    assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_value(3.0), "3");
}

#[test]
fn process_gauges_append_as_separate_blocks() {
    let stats = ProcessStats {
        resident_bytes: 1024,
        virtual_bytes: 4096,
        start_time_seconds: 1_700_000_000,
    };
    let text = append_process("x_total 1\n".to_string(), &stats);
    assert!(text.starts_with("x_total 1\n\n# HELP process_resident_memory_bytes"));
    assert!(text.contains("process_resident_memory_bytes 1024\n"));
    assert!(text.contains("process_virtual_memory_bytes 4096\n"));
    assert!(text.contains("process_start_time_seconds 1700000000\n"));
}
