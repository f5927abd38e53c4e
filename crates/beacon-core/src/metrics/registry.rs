//! Process-wide metric registry.
//!
//! Families are registered once at startup (`&mut self`) and then shared
//! behind an `Arc`; all later mutation happens inside the per-series atomics,
//! so lookups need no lock on the registry itself.

use std::sync::Arc;

use crate::error::{BeaconError, Result};
use crate::metrics::exposition;
use crate::metrics::family::{Counter, Family, Gauge, Histogram};

/// A registered family of any kind, kept in registration order.
#[derive(Clone)]
pub enum Collector {
    Counter(Arc<Family<Counter>>),
    Gauge(Arc<Family<Gauge>>),
    Histogram(Arc<Family<Histogram>>),
}

impl Collector {
    pub fn name(&self) -> &str {
        match self {
            Collector::Counter(f) => f.name(),
            Collector::Gauge(f) => f.name(),
            Collector::Histogram(f) => f.name(),
        }
    }
}

#[derive(Default)]
pub struct Registry {
    families: Vec<Collector>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_counter(
        &mut self,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> Result<Arc<Family<Counter>>> {
        self.check_new(name, labels)?;
        let family = Arc::new(Family::new(name, help, labels));
        self.families.push(Collector::Counter(Arc::clone(&family)));
        Ok(family)
    }

    pub fn register_gauge(
        &mut self,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> Result<Arc<Family<Gauge>>> {
        self.check_new(name, labels)?;
        let family = Arc::new(Family::new(name, help, labels));
        self.families.push(Collector::Gauge(Arc::clone(&family)));
        Ok(family)
    }

    pub fn register_histogram(
        &mut self,
        name: &str,
        help: &str,
        labels: &[&str],
    ) -> Result<Arc<Family<Histogram>>> {
        if labels.contains(&"le") {
            return Err(BeaconError::Metrics(format!(
                "{name}: label name \"le\" is reserved for histogram buckets"
            )));
        }
        self.check_new(name, labels)?;
        let family = Arc::new(Family::new(name, help, labels));
        self.families.push(Collector::Histogram(Arc::clone(&family)));
        Ok(family)
    }

    /// Counter series for `name` and `values`.
    pub fn counter(&self, name: &str, values: &[&str]) -> Result<Arc<Counter>> {
        match self.find(name)? {
            Collector::Counter(f) => f.with_label_values(values),
            _ => Err(kind_mismatch(name, "counter")),
        }
    }

    /// Histogram series for `name` and `values`.
    pub fn histogram(&self, name: &str, values: &[&str]) -> Result<Arc<Histogram>> {
        match self.find(name)? {
            Collector::Histogram(f) => f.with_label_values(values),
            _ => Err(kind_mismatch(name, "histogram")),
        }
    }

    /// Label-less gauge `name`.
    pub fn gauge(&self, name: &str) -> Result<Arc<Gauge>> {
        match self.find(name)? {
            Collector::Gauge(f) => f.get(),
            _ => Err(kind_mismatch(name, "gauge")),
        }
    }

    pub fn families(&self) -> &[Collector] {
        &self.families
    }

    /// Render every family in Prometheus text exposition format.
    pub fn render(&self) -> String {
        exposition::render_registry(self)
    }

    fn find(&self, name: &str) -> Result<&Collector> {
        self.families
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| BeaconError::Metrics(format!("unknown metric: {name}")))
    }

    fn check_new(&self, name: &str, labels: &[&str]) -> Result<()> {
        if !valid_metric_name(name) {
            return Err(BeaconError::Metrics(format!("invalid metric name: {name:?}")));
        }
        if let Some(bad) = labels.iter().find(|l| !valid_label_name(l)) {
            return Err(BeaconError::Metrics(format!("{name}: invalid label name {bad:?}")));
        }
        if self.families.iter().any(|c| c.name() == name) {
            return Err(BeaconError::Metrics(format!("duplicate metric: {name}")));
        }
        Ok(())
    }
}

fn kind_mismatch(name: &str, wanted: &str) -> BeaconError {
    BeaconError::Metrics(format!("{name} is not a {wanted}"))
}

// [a-zA-Z_:][a-zA-Z0-9_:]*
fn valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

// [a-zA-Z_][a-zA-Z0-9_]*, "__" prefix reserved
fn valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    !name.starts_with("__") && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
