//! In-process metrics: typed families, a registry, and text exposition.

pub mod exposition;
pub mod family;
pub mod registry;

pub use family::{Counter, Family, Gauge, Histogram, HistogramSnapshot, MetricKind, Series};
pub use registry::{Collector, Registry};
