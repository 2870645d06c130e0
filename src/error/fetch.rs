//! Failures of a single backend read.

use thiserror::Error;

use super::ErrorCategory;
use crate::traits::HttpError;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request itself failed (connect, timeout, bad URL).
    #[error("network failure: {0}")]
    Network(#[from] HttpError),

    /// The backend returned a structured `{ "error": ... }` payload.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The backend returned 404 for the requested resource.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-2xx status.
    #[error("backend responded with status: {status}")]
    BadStatus { status: u16 },

    /// The body was not the JSON we expected.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Network(_) => ErrorCategory::Network,
            FetchError::Upstream(_) => ErrorCategory::Upstream,
            FetchError::NotFound { .. } => ErrorCategory::NotFound,
            FetchError::BadStatus { status } if *status >= 500 => ErrorCategory::Upstream,
            FetchError::BadStatus { .. } => ErrorCategory::Client,
            FetchError::Decode(_) => ErrorCategory::Decode,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
