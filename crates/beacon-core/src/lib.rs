//! beacon core: metric registry, text exposition, and host sampling contracts.
//!
//! This crate owns the data model shared by the server and its tests: typed
//! metric families with fixed label arity, the Prometheus text exposition
//! writer, and the `Sampler` trait describing point-in-time host queries. It
//! carries no HTTP or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `BeaconError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod sample;
pub mod snapshot;

/// Shared result type.
pub use error::{BeaconError, Result};
