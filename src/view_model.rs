//! Raw device records to classified, render-ready rows.
//!
//! List, card and detail renderers all read from [`DeviceView`], so each
//! classification happens in exactly one place.

use chrono::{Local, TimeZone};
use std::fmt::Display;

use crate::classify::{
    battery_class, battery_fill_percent, battery_label, format_timestamp_in, signal_class,
    BatteryClass, SignalClass,
};
use crate::models::{Device, DeviceTwin};

/// Label for a device without a battery reading.
pub const UNKNOWN_BATTERY: &str = "Unknown";

/// Label for a device without a signal reading.
pub const NO_SIGNAL: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryReading {
    pub level: f64,
    /// Unclamped, e.g. `"150%"`.
    pub label: String,
    pub class: BatteryClass,
    /// Clamped to `0..=100` for drawing.
    pub fill_percent: u16,
}

impl BatteryReading {
    pub fn new(level: f64) -> Self {
        Self {
            level,
            label: battery_label(level),
            class: battery_class(level),
            fill_percent: battery_fill_percent(level),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceView {
    pub device_id: String,
    pub connection: String,
    pub connection_class: String,
    pub connected: bool,
    pub last_activity: String,
    pub signal: SignalClass,
    /// Raw signal text as reported, or [`NO_SIGNAL`].
    pub signal_label: String,
    pub battery: Option<BatteryReading>,
}

impl DeviceView {
    pub fn from_device(device: &Device) -> Self {
        Self::from_device_in(device, &Local)
    }

    /// Same as [`from_device`](Self::from_device) with timestamps in `tz`.
    pub fn from_device_in<Tz>(device: &Device, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let raw_signal = device.wifi_signal();
        Self {
            device_id: device.device_id.clone(),
            connection: device.connection_state.label().to_string(),
            connection_class: device.connection_state.class(),
            connected: device.connection_state.is_connected(),
            last_activity: format_timestamp_in(&device.last_activity_time, tz),
            signal: signal_class(raw_signal),
            signal_label: raw_signal.unwrap_or(NO_SIGNAL).to_string(),
            battery: device.battery_level().map(BatteryReading::new),
        }
    }

    pub fn battery_label(&self) -> &str {
        self.battery
            .as_ref()
            .map_or(UNKNOWN_BATTERY, |b| b.label.as_str())
    }
}

/// Build views for a whole snapshot, preserving order.
pub fn device_views(devices: &[Device]) -> Vec<DeviceView> {
    devices.iter().map(DeviceView::from_device).collect()
}

/// Detail screen model: the summary row plus the twin's extras.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub summary: DeviceView,
    pub status: Option<String>,
    pub status_reason: Option<String>,
    /// Pretty-printed `properties`, shown verbatim.
    pub properties_json: Option<String>,
}

impl DetailView {
    pub fn from_twin(twin: &DeviceTwin) -> Self {
        Self::from_twin_in(twin, &Local)
    }

    pub fn from_twin_in<Tz>(twin: &DeviceTwin, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            summary: DeviceView::from_device_in(&twin.device, tz),
            status: twin.device.status.clone().filter(|s| !s.is_empty()),
            status_reason: twin.device.status_reason.clone().filter(|s| !s.is_empty()),
            properties_json: twin.properties_pretty(),
        }
    }
}
