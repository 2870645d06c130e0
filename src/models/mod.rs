//! Wire models for the device backend.

pub mod device;
pub mod health;

pub use device::{
    ConnectionState, Device, DeviceProperties, DeviceTwin, ReportedProperties,
};
pub use health::HealthResponse;
