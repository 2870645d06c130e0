//! Proxy endpoint failures and their HTTP translation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};
use thiserror::Error;

use super::{ErrorCategory, FetchError};

pub const INVALID_DEVICE_ID: &str = "Invalid device ID";
pub const DEVICES_UNAVAILABLE: &str = "Failed to fetch devices from backend service";
pub const BACKEND_UNAVAILABLE: &str = "Failed to connect to backend service";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("malformed device identifier")]
    InvalidDeviceId,

    #[error("device {id} not found")]
    DeviceNotFound { id: String },

    #[error("listing devices failed: {source}")]
    Devices { source: FetchError },

    #[error("fetching device {id} failed: {source}")]
    Device { id: String, source: FetchError },

    #[error("health check failed: {source}")]
    Health {
        source: FetchError,
        timestamp: String,
    },
}

impl ProxyError {
    /// Classify a failed single-device read.
    pub fn device(id: &str, source: FetchError) -> Self {
        if source.is_not_found() {
            ProxyError::DeviceNotFound { id: id.to_string() }
        } else {
            ProxyError::Device {
                id: id.to_string(),
                source,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidDeviceId => StatusCode::BAD_REQUEST,
            ProxyError::DeviceNotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::Devices { .. } | ProxyError::Device { .. } | ProxyError::Health { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::InvalidDeviceId => ErrorCategory::Client,
            ProxyError::DeviceNotFound { .. } => ErrorCategory::NotFound,
            ProxyError::Devices { source }
            | ProxyError::Device { source, .. }
            | ProxyError::Health { source, .. } => source.category(),
        }
    }

    /// Client-facing body. Never includes upstream content.
    pub fn body(&self) -> Value {
        match self {
            ProxyError::InvalidDeviceId => json!({ "error": INVALID_DEVICE_ID }),
            ProxyError::DeviceNotFound { id } => {
                json!({ "error": format!("Device with ID {} not found", id) })
            }
            ProxyError::Devices { .. } => json!({ "devices": [], "error": DEVICES_UNAVAILABLE }),
            ProxyError::Device { id, .. } => {
                json!({ "error": format!("Failed to fetch device {} from backend service", id) })
            }
            ProxyError::Health { timestamp, .. } => {
                json!({ "message": BACKEND_UNAVAILABLE, "timestamp": timestamp })
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(category = %self.category(), "{}", self);
        } else {
            tracing::debug!("{}", self);
        }
        (status, Json(self.body())).into_response()
    }
}
