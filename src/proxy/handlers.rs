use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use super::ProxyState;
use crate::error::ProxyError;

const MAX_DEVICE_ID_LEN: usize = 128;

/// Accept an identifier only if it is safe to splice into a backend path.
pub fn validate_device_id(id: &str) -> Result<&str, ProxyError> {
    let malformed = id.is_empty()
        || id.chars().count() > MAX_DEVICE_ID_LEN
        || id
            .chars()
            .any(|c| c == '/' || c.is_whitespace() || c.is_control());

    if malformed {
        Err(ProxyError::InvalidDeviceId)
    } else {
        Ok(id)
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) async fn list_devices(
    State(state): State<ProxyState>,
) -> Result<Json<Value>, ProxyError> {
    let devices = state
        .client
        .list_devices()
        .await
        .map_err(|source| ProxyError::Devices { source })?;

    tracing::debug!("Proxied {} devices", devices.len());
    Ok(Json(json!({ "devices": devices })))
}

pub(super) async fn get_device(
    State(state): State<ProxyState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let id = validate_device_id(&raw_id)?;
    let device = state
        .client
        .device(id)
        .await
        .map_err(|source| ProxyError::device(id, source))?;

    Ok(Json(json!({ "device": device })))
}

pub(super) async fn missing_device_id() -> ProxyError {
    ProxyError::InvalidDeviceId
}

pub(super) async fn health(State(state): State<ProxyState>) -> Result<Json<Value>, ProxyError> {
    let health = state
        .client
        .health()
        .await
        .map_err(|source| ProxyError::Health {
            source,
            timestamp: now_iso(),
        })?;

    Ok(Json(json!({
        "message": health.message_or_default(),
        "timestamp": now_iso(),
    })))
}
