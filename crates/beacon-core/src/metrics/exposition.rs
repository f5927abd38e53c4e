//! Prometheus text exposition writer.
//!
//! ```text
//! # HELP <name> <help>
//! # TYPE <name> <kind>
//! <name>{<label>="<value>",...} <value>
//! ```
//!
//! Blocks are separated by a blank line. Label braces are omitted when a
//! sample has no labels.

use std::fmt::Write;

use crate::metrics::family::MetricKind;
use crate::metrics::registry::{Collector, Registry};
use crate::sample::ProcessStats;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a sample value the way scrapers parse it.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// Incremental builder for one exposition document.
#[derive(Debug, Default)]
pub struct TextWriter {
    out: String,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue writing after an already-rendered document.
    pub fn resume(out: String) -> Self {
        Self { out }
    }

    /// Start a metric block.
    pub fn header(&mut self, name: &str, help: &str, kind: MetricKind) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
        let _ = writeln!(self.out, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(self.out, "# TYPE {} {}", name, kind.as_str());
    }

    /// Write one sample line. `value` is already formatted.
    pub fn sample(&mut self, name: &str, labels: &[(&str, &str)], value: &str) {
        if labels.is_empty() {
            let _ = writeln!(self.out, "{} {}", name, value);
            return;
        }
        let label_str = labels
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(self.out, "{}{{{}}} {}", name, label_str, value);
    }

    /// Header plus a single label-less gauge line.
    pub fn gauge(&mut self, name: &str, help: &str, value: f64) {
        self.header(name, help, MetricKind::Gauge);
        self.sample(name, &[], &format_value(value));
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn pairs<'a>(label_names: &'a [String], values: &'a [String]) -> Vec<(&'a str, &'a str)> {
    label_names
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .collect()
}

/// Render every family of `registry` in registration order.
pub fn render_registry(registry: &Registry) -> String {
    let mut w = TextWriter::new();
    for collector in registry.families() {
        match collector {
            Collector::Counter(f) => {
                w.header(f.name(), f.help(), f.kind());
                for (values, cell) in f.series() {
                    let labels = pairs(f.label_names(), &values);
                    w.sample(f.name(), &labels, &cell.get().to_string());
                }
            }
            Collector::Gauge(f) => {
                w.header(f.name(), f.help(), f.kind());
                for (values, cell) in f.series() {
                    let labels = pairs(f.label_names(), &values);
                    w.sample(f.name(), &labels, &format_value(cell.get()));
                }
            }
            Collector::Histogram(f) => {
                w.header(f.name(), f.help(), f.kind());
                let bucket = format!("{}_bucket", f.name());
                let sum = format!("{}_sum", f.name());
                let count = format!("{}_count", f.name());
                for (values, cell) in f.series() {
                    let snap = cell.snapshot();
                    let base = pairs(f.label_names(), &values);
                    for (le, n) in &snap.buckets {
                        let le = format_value(*le);
                        let mut labels = base.clone();
                        labels.push(("le", le.as_str()));
                        w.sample(&bucket, &labels, &n.to_string());
                    }
                    let mut labels = base.clone();
                    labels.push(("le", "+Inf"));
                    w.sample(&bucket, &labels, &snap.count.to_string());
                    w.sample(&sum, &base, &format_value(snap.sum_seconds));
                    w.sample(&count, &base, &snap.count.to_string());
                }
            }
        }
    }
    w.finish()
}

/// Append the standard process gauges to a rendered document.
pub fn append_process(rendered: String, stats: &ProcessStats) -> String {
    let mut w = TextWriter::resume(rendered);
    w.gauge(
        "process_resident_memory_bytes",
        "Resident memory size in bytes.",
        stats.resident_bytes as f64,
    );
    w.gauge(
        "process_virtual_memory_bytes",
        "Virtual memory size in bytes.",
        stats.virtual_bytes as f64,
    );
    w.gauge(
        "process_start_time_seconds",
        "Start time of the process since unix epoch in seconds.",
        stats.start_time_seconds as f64,
    );
    w.finish()
}
