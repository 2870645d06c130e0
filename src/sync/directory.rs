//! Device directory sync: the fleet collection, refreshed on an interval.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use super::poller::{PollHandle, PollOptions, PollSource, Poller};
use crate::client::FleetClient;
use crate::error::FetchError;
use crate::models::Device;

/// Shown for any failure that is not a structured backend error.
pub const DIRECTORY_FETCH_FAILED: &str =
    "Failed to fetch devices. Make sure the backend is running.";

/// Latest view of the device collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryState {
    /// Last good snapshot, replaced wholesale on success.
    pub devices: Vec<Device>,
    /// True until the first fetch settles.
    pub loading: bool,
    pub error: Option<String>,
    /// Time of the last successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of settled fetches.
    pub polls: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            loading: true,
            error: None,
            last_updated: None,
            polls: 0,
        }
    }
}

impl DirectoryState {
    /// Fold one fetch outcome into the state.
    ///
    /// Failures keep the previous snapshot.
    pub fn apply(&mut self, result: Result<Vec<Device>, FetchError>) {
        match result {
            Ok(devices) => {
                self.devices = devices;
                self.error = None;
                self.last_updated = Some(Utc::now());
            }
            Err(FetchError::Upstream(message)) => {
                tracing::warn!("Backend reported an error listing devices: {}", message);
                self.error = Some(message);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch devices: {}", e);
                self.error = Some(DIRECTORY_FETCH_FAILED.to_string());
            }
        }
        self.loading = false;
        self.polls += 1;
    }

    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

struct DirectorySource {
    client: FleetClient,
}

#[async_trait]
impl PollSource for DirectorySource {
    type Output = Result<Vec<Device>, FetchError>;
    type State = DirectoryState;

    fn describe(&self) -> String {
        "device directory".to_string()
    }

    async fn fetch(&self) -> Self::Output {
        self.client.list_devices().await
    }

    fn apply(&self, state: &mut DirectoryState, output: Self::Output) {
        state.apply(output);
    }
}

/// Polls `GET /iot/devices` until stopped or dropped.
#[derive(Debug)]
pub struct DirectorySync {
    handle: PollHandle<DirectoryState>,
}

impl DirectorySync {
    /// Start polling now. Requires a tokio runtime.
    pub fn start(client: FleetClient, interval: Duration) -> Self {
        let handle = Poller::spawn(
            DirectorySource { client },
            DirectoryState::default(),
            PollOptions::every(interval),
        );
        Self { handle }
    }

    pub fn state(&self) -> DirectoryState {
        self.handle.state()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&DirectoryState) -> R) -> R {
        self.handle.with_state(f)
    }

    pub fn has_changed(&self) -> bool {
        self.handle.has_changed()
    }

    pub fn mark_seen(&mut self) {
        self.handle.mark_seen();
    }

    pub async fn changed(&mut self) -> bool {
        self.handle.changed().await
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn stop(&mut self) {
        self.handle.stop();
    }
}
