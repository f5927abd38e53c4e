//! Observability: metric families, per-request lifecycle hooks, and the
//! error boundary that turns unexpected failures into structured 500s.

pub mod boundary;
pub mod lifecycle;
pub mod metrics;
