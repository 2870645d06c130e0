//! Telemetry classification.
//!
//! Pure functions that map raw telemetry to the small, fixed set of
//! categories the renderers style on. None of them can fail: every input,
//! including absent or garbage values, lands in some category.

mod battery;
mod signal;
mod timestamp;

pub use battery::{battery_class, battery_fill_percent, battery_label, BatteryClass};
pub use signal::{signal_class, SignalClass};
pub use timestamp::{format_timestamp, format_timestamp_in, INVALID_DATE, NOT_AVAILABLE};
