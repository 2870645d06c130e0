//! Device records as returned by the inventory/twin backend.
//!
//! Decoding is deliberately forgiving: every telemetry field is optional and
//! a malformed value degrades to "absent" instead of rejecting the device.
//! Only `deviceId` is required. Unknown fields are kept in `extra` maps so a
//! device re-serializes without losing data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// ConnectionState
// ============================================================================

/// Connection state reported by the backend, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ConnectionState {
    Connected,
    Disconnected,
    /// Any other backend-defined state, verbatim
    Other(String),
    /// Missing, null or blank
    #[default]
    Unknown,
}

impl ConnectionState {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            ConnectionState::Unknown
        } else if trimmed.eq_ignore_ascii_case("connected") {
            ConnectionState::Connected
        } else if trimmed.eq_ignore_ascii_case("disconnected") {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Other(trimmed.to_string())
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Other(raw) => raw,
            ConnectionState::Unknown => "Unknown",
        }
    }

    /// Lower-cased style key used by the renderers.
    pub fn class(&self) -> String {
        self.label().to_lowercase()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl From<Option<String>> for ConnectionState {
    fn from(raw: Option<String>) -> Self {
        raw.map(|s| ConnectionState::parse(&s))
            .unwrap_or(ConnectionState::Unknown)
    }
}

impl From<ConnectionState> for String {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Unknown => String::new(),
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Last-reported telemetry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedProperties {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub wifi_signal_strength: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_level: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceProperties {
    #[serde(default, deserialize_with = "lenient_reported")]
    pub reported: ReportedProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Device
// ============================================================================

/// Directory-level device record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    #[serde(default)]
    pub connection_state: ConnectionState,
    /// ISO-8601 timestamp; empty when the backend has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_activity_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    /// Older backends put the signal at the top level.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub wifi_signal_strength: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<DeviceProperties>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Minimal record, mostly for tests and fixtures.
    pub fn new(device_id: impl Into<String>, connection_state: ConnectionState) -> Self {
        Self {
            device_id: device_id.into(),
            connection_state,
            last_activity_time: String::new(),
            status: None,
            status_reason: None,
            wifi_signal_strength: None,
            properties: None,
            extra: Map::new(),
        }
    }

    pub fn with_last_activity(mut self, ts: impl Into<String>) -> Self {
        self.last_activity_time = ts.into();
        self
    }

    pub fn with_wifi(mut self, signal: impl Into<String>) -> Self {
        self.reported_mut().wifi_signal_strength = Some(signal.into());
        self
    }

    pub fn with_battery(mut self, level: f64) -> Self {
        self.reported_mut().battery_level = Some(level);
        self
    }

    fn reported_mut(&mut self) -> &mut ReportedProperties {
        &mut self.properties.get_or_insert_with(Default::default).reported
    }

    pub fn reported(&self) -> Option<&ReportedProperties> {
        self.properties.as_ref().map(|p| &p.reported)
    }

    /// Reported WiFi signal, falling back to the legacy top-level field.
    pub fn wifi_signal(&self) -> Option<&str> {
        self.reported()
            .and_then(|r| r.wifi_signal_strength.as_deref())
            .or(self.wifi_signal_strength.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn battery_level(&self) -> Option<f64> {
        self.reported().and_then(|r| r.battery_level)
    }
}

// ============================================================================
// DeviceTwin
// ============================================================================

/// Detail-level record: the typed device plus the full twin document.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTwin {
    pub device: Device,
    pub document: Value,
}

impl DeviceTwin {
    pub fn from_value(document: Value) -> Result<Self, serde_json::Error> {
        let device = Device::deserialize(&document)?;
        Ok(Self { device, document })
    }

    pub fn device_id(&self) -> &str {
        &self.device.device_id
    }

    /// The twin's `properties` object, verbatim, if it has one.
    pub fn raw_properties(&self) -> Option<&Value> {
        self.document.get("properties").filter(|v| !v.is_null())
    }

    /// Pretty-printed `properties` for the verbatim fallback panel.
    pub fn properties_pretty(&self) -> Option<String> {
        self.raw_properties()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
    }
}

// ============================================================================
// Lenient field decoders
// ============================================================================

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    })
}

fn lenient_reported<'de, D: Deserializer<'de>>(d: D) -> Result<ReportedProperties, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(ReportedProperties::deserialize(value).unwrap_or_default())
}

fn lenient_properties<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DeviceProperties>, D::Error> {
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(DeviceProperties::deserialize(value).ok())
}
