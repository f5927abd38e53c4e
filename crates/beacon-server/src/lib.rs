//! beacon server library entry.
//!
//! Wires config, the host sampler, the metric registry, lifecycle hooks, and
//! the HTTP surface into one axum application. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod humanize;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod router;
pub mod sampler;
