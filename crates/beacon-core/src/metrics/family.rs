//! Metric families and their per-series atomic cells.
//!
//! A family owns a fixed, ordered list of label names. Series are keyed by the
//! label values in that order, created on first use, and remembered with a
//! sequence number so exposition can replay them in first-seen order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::error::{BeaconError, Result};

/// Metric type as written on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// A single time series cell.
pub trait Series: Default + Send + Sync + 'static {
    const KIND: MetricKind;
}

/// Monotonic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.inc_by(1);
    }

    /// Increment by an arbitrary value.
    pub fn inc_by(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Series for Counter {
    const KIND: MetricKind = MetricKind::Counter;
}

/// Last-write-wins gauge. The `f64` is stored as raw bits.
#[derive(Debug, Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Series for Gauge {
    const KIND: MetricKind = MetricKind::Gauge;
}

// Upper bounds in microseconds: 5ms .. 10s.
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

/// Latency histogram with fixed cumulative buckets.
///
/// Observations are recorded in whole microseconds to keep every field an
/// integer atomic; exposition converts back to seconds.
#[derive(Debug)]
pub struct Histogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

/// Point-in-time read of a histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound in seconds, cumulative count)`, ascending.
    pub buckets: Vec<(f64, u64)>,
    pub count: u64,
    pub sum_seconds: f64,
}

impl Histogram {
    /// Observe a duration and increment every bucket whose bound covers it.
    pub fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        // Reads are not atomic as a set: an observe racing this loop can show
        // up in a lower bucket only. Clamp so the cumulative counts never dip.
        let mut running = 0u64;
        let buckets: Vec<(f64, u64)> = BUCKETS_MICROS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&le, c)| {
                running = running.max(c.load(Ordering::Relaxed));
                (le as f64 / 1_000_000.0, running)
            })
            .collect();
        let count = self.count.load(Ordering::Relaxed).max(running);
        let sum_seconds = self.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
        HistogramSnapshot { buckets, count, sum_seconds }
    }
}

impl Series for Histogram {
    const KIND: MetricKind = MetricKind::Histogram;
}

struct Slot<S> {
    seq: u64,
    cell: Arc<S>,
}

/// A named metric with fixed label names and one series per label-value tuple.
pub struct Family<S: Series> {
    name: String,
    help: String,
    label_names: Vec<String>,
    series: DashMap<Vec<String>, Slot<S>>,
    next_seq: AtomicU64,
}

impl<S: Series> Family<S> {
    pub(crate) fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            series: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> MetricKind {
        S::KIND
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    /// Resolve the series for `values`, creating it on first use.
    ///
    /// `values` must match the declared label names one-to-one, in order.
    pub fn with_label_values(&self, values: &[&str]) -> Result<Arc<S>> {
        if values.len() != self.label_names.len() {
            return Err(BeaconError::Metrics(format!(
                "{} expects {} label values ({}), got {}",
                self.name,
                self.label_names.len(),
                self.label_names.join(","),
                values.len()
            )));
        }

        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        if let Some(slot) = self.series.get(&key) {
            return Ok(Arc::clone(&slot.cell));
        }

        let slot = self.series.entry(key).or_insert_with(|| Slot {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            cell: Arc::new(S::default()),
        });
        Ok(Arc::clone(&slot.cell))
    }

    /// Shortcut for label-less families.
    pub fn get(&self) -> Result<Arc<S>> {
        self.with_label_values(&[])
    }

    /// Number of distinct series seen so far.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// All series in first-seen order.
    pub fn series(&self) -> Vec<(Vec<String>, Arc<S>)> {
        let mut out: Vec<(u64, Vec<String>, Arc<S>)> = self
            .series
            .iter()
            .map(|r| (r.value().seq, r.key().clone(), Arc::clone(&r.value().cell)))
            .collect();
        out.sort_by_key(|(seq, _, _)| *seq);
        out.into_iter().map(|(_, k, c)| (k, c)).collect()
    }
}
