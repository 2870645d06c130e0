//! AppMessage enum for async results delivered to the UI loop.

use crate::health::HealthStatus;

#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Startup backend health check finished
    HealthChecked(HealthStatus),
}
