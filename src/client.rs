//! Typed client for the device inventory/twin backend.
//!
//! Wraps any [`HttpClient`] and turns raw responses into models or a
//! [`FetchError`]. Shape validation happens here, once, so malformed
//! payloads never reach the sync state or the renderers.

use serde_json::Value;
use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::normalize_base_url;
use crate::error::FetchError;
use crate::models::{Device, DeviceTwin, HealthResponse};
use crate::traits::{Headers, HttpClient, Response};

/// Client for the device backend's read endpoints.
#[derive(Clone)]
pub struct FleetClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for FleetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FleetClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http,
        }
    }

    /// Client backed by a default reqwest adapter.
    pub fn with_reqwest(base_url: &str) -> Self {
        Self::new(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn devices_url(&self) -> String {
        format!("{}/iot/devices", self.base_url)
    }

    pub fn device_url(&self, device_id: &str) -> String {
        format!("{}/iot/devices/{}", self.base_url, urlencoding::encode(device_id))
    }

    pub fn twin_url(&self, device_id: &str) -> String {
        format!("{}/twin", self.device_url(device_id))
    }

    pub fn health_url(&self) -> String {
        format!("{}/iot-status/", self.base_url)
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        tracing::trace!("GET {}", url);
        Ok(self.http.get(url, &headers).await?)
    }

    /// `GET /iot/devices`.
    pub async fn list_devices(&self) -> Result<Vec<Device>, FetchError> {
        let response = self.get(&self.devices_url()).await?;
        decode_device_list(&response)
    }

    /// `GET /iot/devices/{id}`, returned verbatim.
    pub async fn device(&self, device_id: &str) -> Result<Value, FetchError> {
        let response = self.get(&self.device_url(device_id)).await?;
        check_status(&response, device_id)?;
        Ok(response.json::<Value>()?)
    }

    /// `GET /iot/devices/{id}/twin`.
    pub async fn device_twin(&self, device_id: &str) -> Result<DeviceTwin, FetchError> {
        let response = self.get(&self.twin_url(device_id)).await?;
        check_status(&response, device_id)?;
        let document = response.json::<Value>()?;
        Ok(DeviceTwin::from_value(document)?)
    }

    /// `GET /iot-status/`.
    pub async fn health(&self) -> Result<HealthResponse, FetchError> {
        let response = self.get(&self.health_url()).await?;
        if !response.is_success() {
            return Err(FetchError::BadStatus {
                status: response.status,
            });
        }
        Ok(response.json::<HealthResponse>()?)
    }
}

fn check_status(response: &Response, resource: &str) -> Result<(), FetchError> {
    if response.is_success() {
        Ok(())
    } else if response.is_not_found() {
        Err(FetchError::NotFound {
            resource: resource.to_string(),
        })
    } else {
        Err(FetchError::BadStatus {
            status: response.status,
        })
    }
}

/// Decode a directory response.
///
/// - a body with a truthy `error` field is an [`FetchError::Upstream`],
///   whatever the status;
/// - otherwise a non-2xx status is [`FetchError::BadStatus`];
/// - a non-array body counts as zero devices;
/// - array entries that are not device records are skipped.
pub fn decode_device_list(response: &Response) -> Result<Vec<Device>, FetchError> {
    let body: Value = match response.json() {
        Ok(body) => body,
        Err(_) if !response.is_success() => {
            return Err(FetchError::BadStatus {
                status: response.status,
            })
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(message) = upstream_error(&body) {
        return Err(FetchError::Upstream(message));
    }

    if !response.is_success() {
        return Err(FetchError::BadStatus {
            status: response.status,
        });
    }

    let Value::Array(items) = body else {
        tracing::warn!("Device list is not an array, treating as empty");
        return Ok(Vec::new());
    };

    let total = items.len();
    let devices: Vec<Device> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Device>(item) {
            Ok(device) => Some(device),
            Err(e) => {
                tracing::warn!("Skipping malformed device record: {}", e);
                None
            }
        })
        .collect();

    if devices.len() != total {
        tracing::debug!("Decoded {} of {} device records", devices.len(), total);
    }
    Ok(devices)
}

/// The `error` field of a payload, if it is set to something truthy.
fn upstream_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
