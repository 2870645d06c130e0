//! Device detail sync: one device's twin, polled while an identifier is
//! selected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use super::poller::{PollHandle, PollOptions, PollSource, Poller};
use crate::client::FleetClient;
use crate::error::FetchError;
use crate::models::DeviceTwin;

/// What a consumer should render for the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    /// No identifier selected yet.
    Idle,
    Loading,
    Ready,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub device_id: Option<String>,
    pub device: Option<DeviceTwin>,
    pub loading: bool,
    pub error: Option<String>,
    pub not_found: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DetailState {
    fn for_device(device_id: &str) -> Self {
        Self {
            device_id: Some(device_id.to_string()),
            loading: true,
            ..Self::default()
        }
    }

    /// Fold one fetch outcome into the state.
    pub fn apply(&mut self, result: Result<DeviceTwin, FetchError>) {
        let id = self.device_id.clone().unwrap_or_default();
        match result {
            Ok(twin) => {
                self.device = Some(twin);
                self.error = None;
                self.not_found = false;
                self.last_updated = Some(Utc::now());
            }
            Err(e) => {
                tracing::warn!("Failed to fetch device {}: {}", id, e);
                self.not_found = e.is_not_found();
                if self.not_found {
                    self.device = None;
                }
                self.error = Some(detail_error_message(&id, &e));
            }
        }
        self.loading = false;
    }

    pub fn status(&self) -> DetailStatus {
        if self.device_id.is_none() {
            DetailStatus::Idle
        } else if self.loading {
            DetailStatus::Loading
        } else if self.not_found {
            DetailStatus::NotFound
        } else if self.device.is_some() {
            DetailStatus::Ready
        } else {
            DetailStatus::Failed
        }
    }
}

fn detail_error_message(device_id: &str, error: &FetchError) -> String {
    match error {
        FetchError::NotFound { .. } | FetchError::BadStatus { .. } | FetchError::Upstream(_) => {
            format!("Error: Failed to fetch device with ID: {}", device_id)
        }
        FetchError::Network(_) | FetchError::Decode(_) => {
            "Error: Failed to fetch device details".to_string()
        }
    }
}

struct TwinSource {
    client: FleetClient,
    device_id: String,
}

#[async_trait]
impl PollSource for TwinSource {
    type Output = Result<DeviceTwin, FetchError>;
    type State = DetailState;

    fn describe(&self) -> String {
        format!("device {}", self.device_id)
    }

    async fn fetch(&self) -> Self::Output {
        self.client.device_twin(&self.device_id).await
    }

    fn apply(&self, state: &mut DetailState, output: Self::Output) {
        state.apply(output);
    }
}

/// Polls `GET /iot/devices/{id}/twin` for the selected identifier.
///
/// Nothing is fetched until [`select`](Self::select) is given an id.
#[derive(Debug)]
pub struct DetailSync {
    client: FleetClient,
    interval: Duration,
    active: Option<PollHandle<DetailState>>,
}

impl DetailSync {
    pub fn new(client: FleetClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            active: None,
        }
    }

    /// Point the sync at `device_id`.
    ///
    /// `None` stops polling. The current id is a no-op. Any other id stops
    /// the current schedule, dropping its pending fetch, and starts a new
    /// one. Returns true if a new schedule was started.
    pub fn select(&mut self, device_id: Option<&str>) -> bool {
        match device_id {
            None => {
                self.stop();
                false
            }
            Some(id) if self.device_id().as_deref() == Some(id) && self.is_running() => false,
            Some(id) => {
                self.stop();
                let source = TwinSource {
                    client: self.client.clone(),
                    device_id: id.to_string(),
                };
                self.active = Some(Poller::spawn(
                    source,
                    DetailState::for_device(id),
                    PollOptions::every(self.interval),
                ));
                true
            }
        }
    }

    pub fn device_id(&self) -> Option<String> {
        self.active
            .as_ref()
            .and_then(|h| h.with_state(|s| s.device_id.clone()))
    }

    /// Latest state, or an idle state when nothing is selected.
    pub fn state(&self) -> DetailState {
        self.active
            .as_ref()
            .map(PollHandle::state)
            .unwrap_or_default()
    }

    pub fn status(&self) -> DetailStatus {
        self.active
            .as_ref()
            .map_or(DetailStatus::Idle, |h| h.with_state(DetailState::status))
    }

    pub fn has_changed(&self) -> bool {
        self.active.as_ref().is_some_and(PollHandle::has_changed)
    }

    pub fn mark_seen(&mut self) {
        if let Some(handle) = self.active.as_mut() {
            handle.mark_seen();
        }
    }

    /// Wait for the next change. Returns false when nothing is selected.
    pub async fn changed(&mut self) -> bool {
        match self.active.as_mut() {
            Some(handle) => handle.changed().await,
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(PollHandle::is_running)
    }

    /// Stop polling and forget the selection.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;
    use std::sync::Arc;

    fn client(mock: &MockHttpClient) -> FleetClient {
        FleetClient::new("http://backend", Arc::new(mock.clone()))
    }

    fn twin(id: &str) -> serde_json::Value {
        json!({
            "deviceId": id,
            "connectionState": "Connected",
            "properties": {"reported": {"wifiSignalStrength": "Good", "batteryLevel": 72}}
        })
    }

    #[test]
    fn test_status_progression() {
        let mut state = DetailState::default();
        assert_eq!(state.status(), DetailStatus::Idle);

        state = DetailState::for_device("d1");
        assert_eq!(state.status(), DetailStatus::Loading);

        state.apply(Err(FetchError::Network(HttpError::Timeout("slow".into()))));
        assert_eq!(state.status(), DetailStatus::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Error: Failed to fetch device details")
        );

        let twin = DeviceTwin::from_value(twin("d1")).unwrap();
        state.apply(Ok(twin));
        assert_eq!(state.status(), DetailStatus::Ready);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_bad_status_names_identifier() {
        let mut state = DetailState::for_device("d7");
        state.apply(Err(FetchError::BadStatus { status: 500 }));
        assert_eq!(
            state.error.as_deref(),
            Some("Error: Failed to fetch device with ID: d7")
        );
        assert!(!state.not_found);
    }

    #[test]
    fn test_error_after_success_keeps_device() {
        let mut state = DetailState::for_device("d1");
        state.apply(Ok(DeviceTwin::from_value(twin("d1")).unwrap()));
        state.apply(Err(FetchError::BadStatus { status: 503 }));

        assert_eq!(state.status(), DetailStatus::Ready);
        assert!(state.device.is_some());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_not_found_clears_device() {
        let mut state = DetailState::for_device("d1");
        state.apply(Ok(DeviceTwin::from_value(twin("d1")).unwrap()));
        state.apply(Err(FetchError::NotFound {
            resource: "d1".into(),
        }));

        assert_eq!(state.status(), DetailStatus::NotFound);
        assert!(state.device.is_none());
    }

    #[test]
    fn test_failure_after_not_found_is_generic() {
        let mut state = DetailState::for_device("d1");
        state.apply(Err(FetchError::NotFound {
            resource: "d1".into(),
        }));
        assert_eq!(state.status(), DetailStatus::NotFound);

        state.apply(Err(FetchError::BadStatus { status: 500 }));
        assert!(!state.not_found);
        assert_eq!(state.status(), DetailStatus::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Error: Failed to fetch device with ID: d1")
        );

        state.apply(Err(FetchError::Network(HttpError::Timeout("slow".into()))));
        assert_eq!(state.status(), DetailStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_until_selected() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, twin("d1")));

        let mut sync = DetailSync::new(client(&mock), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(sync.status(), DetailStatus::Idle);
        assert!(mock.get_requests().is_empty());
        assert!(!sync.changed().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_device_is_not_found() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://backend/iot/devices/missing/twin",
            MockResponse::json(404, json!({"message": "not found"})),
        );

        let mut sync = DetailSync::new(client(&mock), Duration::from_secs(5));
        assert!(sync.select(Some("missing")));
        assert!(sync.changed().await);

        let state = sync.state();
        assert!(state.not_found);
        assert_eq!(sync.status(), DetailStatus::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_same_id_is_noop() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, twin("d1")));

        let mut sync = DetailSync::new(client(&mock), Duration::from_secs(5));
        assert!(sync.select(Some("d1")));
        assert!(!sync.select(Some("d1")));
        assert_eq!(sync.device_id().as_deref(), Some("d1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_identifier_change_restarts_polling() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://backend/iot/devices/d1/twin",
            MockResponse::json(200, twin("d1")),
        );
        mock.set_response(
            "http://backend/iot/devices/d2/twin",
            MockResponse::json(200, twin("d2")),
        );
        mock.set_latency(Duration::from_millis(500));

        let mut sync = DetailSync::new(client(&mock), Duration::from_secs(5));
        sync.select(Some("d1"));
        tokio::time::sleep(Duration::from_millis(100)).await;

        // d1's fetch is still pending; switching drops it.
        assert!(sync.select(Some("d2")));
        assert!(sync.changed().await);

        let state = sync.state();
        assert_eq!(state.device_id.as_deref(), Some("d2"));
        assert_eq!(state.device.as_ref().map(DeviceTwin::device_id), Some("d2"));

        tokio::time::sleep(Duration::from_secs(12)).await;
        assert_eq!(mock.request_count("http://backend/iot/devices/d1/twin"), 1);
        assert!(mock.request_count("http://backend/iot/devices/d2/twin") >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deselect_stops_polling() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, twin("d1")));

        let mut sync = DetailSync::new(client(&mock), Duration::from_secs(5));
        sync.select(Some("d1"));
        assert!(sync.changed().await);

        sync.select(None);
        let count = mock.get_requests().len();
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert_eq!(mock.get_requests().len(), count);
        assert_eq!(sync.status(), DetailStatus::Idle);
        assert!(sync.device_id().is_none());
    }
}
