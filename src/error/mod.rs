//! Error types for the dashboard.
//!
//! | Type | Raised by | Surfaces as |
//! |------|-----------|-------------|
//! | [`FetchError`] | [`crate::client::FleetClient`] | sync error string / proxy status |
//! | [`ProxyError`] | `crate::proxy` handlers | JSON error response |
//! | [`ConfigError`] | [`crate::config`] | startup failure |
//!
//! Sync components never hand a `FetchError` to their consumers; they
//! collapse it into a message on their state. The proxy maps it onto a
//! status code and a fixed message (see `crate::proxy`).

mod category;
mod fetch;
mod proxy;

pub use category::ErrorCategory;
pub use fetch::FetchError;
pub use proxy::{ProxyError, BACKEND_UNAVAILABLE, DEVICES_UNAVAILABLE, INVALID_DEVICE_ID};

use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}
