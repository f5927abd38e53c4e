//! Shared error type across beacon crates.

use thiserror::Error;

/// Stable error codes (logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Host introspection failed.
    SamplerFailed,
    /// Metric definition or label mismatch.
    BadMetric,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::SamplerFailed => "SAMPLER_FAILED",
            ClientCode::BadMetric => "BAD_METRIC",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("sampler: {0}")]
    Sampler(String),
    #[error("metrics: {0}")]
    Metrics(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl BeaconError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BeaconError::Sampler(_) => ClientCode::SamplerFailed,
            BeaconError::Metrics(_) => ClientCode::BadMetric,
            BeaconError::Config(_) => ClientCode::BadConfig,
            BeaconError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            BeaconError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Message without the variant prefix, for bodies that carry their own context.
    pub fn detail(&self) -> String {
        match self {
            BeaconError::Sampler(m)
            | BeaconError::Metrics(m)
            | BeaconError::Config(m)
            | BeaconError::Internal(m) => m.clone(),
            BeaconError::UnsupportedVersion => self.to_string(),
        }
    }
}
