//! Backend reachability check, run once at startup for the header.

use std::time::Instant;

use crate::client::FleetClient;

/// Shown when the status endpoint cannot be reached.
pub const BACKEND_UNREACHABLE: &str =
    "Failed to connect to backend. Make sure the backend is running.";

/// Result of a backend health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: String,
    pub response_time_ms: Option<u64>,
}

impl HealthStatus {
    /// Placeholder shown before the check completes.
    pub fn pending() -> Self {
        Self {
            healthy: false,
            message: "Checking backend...".to_string(),
            response_time_ms: None,
        }
    }
}

/// Query the backend status endpoint and time it.
pub async fn check_backend(client: &FleetClient) -> HealthStatus {
    let start = Instant::now();
    match client.health().await {
        Ok(health) => {
            let elapsed = start.elapsed().as_millis() as u64;
            tracing::info!("Backend healthy ({}ms)", elapsed);
            HealthStatus {
                healthy: true,
                message: health.message_or_default().to_string(),
                response_time_ms: Some(elapsed),
            }
        }
        Err(e) => {
            tracing::warn!("Backend health check failed: {}", e);
            HealthStatus {
                healthy: false,
                message: BACKEND_UNREACHABLE.to_string(),
                response_time_ms: None,
            }
        }
    }
}
