//! Shared fixtures for integration tests.

#![allow(dead_code)]

use fleetdash::client::FleetClient;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use wiremock::MockServer;

/// Poll interval short enough to keep tests quick on real time.
pub const FAST_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound for any single wait in a test.
pub const WAIT: Duration = Duration::from_secs(5);

pub fn client_for(server: &MockServer) -> FleetClient {
    FleetClient::with_reqwest(&server.uri())
}

pub fn device_json(id: &str, state: &str) -> Value {
    json!({
        "deviceId": id,
        "connectionState": state,
        "lastActivityTime": "2024-01-01T00:00:00Z",
        "properties": {"reported": {"wifiSignalStrength": "Good", "batteryLevel": 64}}
    })
}

/// Await `fut`, failing the test if it takes longer than [`WAIT`].
pub async fn within<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(WAIT, fut)
        .await
        .expect("timed out waiting for sync")
}
