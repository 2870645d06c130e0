use serde::{Deserialize, Serialize};

/// Body of the backend status endpoint. Only `message` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthResponse {
    pub const DEFAULT_MESSAGE: &'static str = "Backend is healthy";

    /// The backend's message, or a generic one when it sent none.
    pub fn message_or_default(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(Self::DEFAULT_MESSAGE)
    }
}
