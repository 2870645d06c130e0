use std::fmt;

/// Battery charge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryClass {
    Full,
    High,
    Medium,
    Low,
    Critical,
}

impl BatteryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryClass::Full => "full",
            BatteryClass::High => "high",
            BatteryClass::Medium => "medium",
            BatteryClass::Low => "low",
            BatteryClass::Critical => "critical",
        }
    }
}

impl fmt::Display for BatteryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a battery percentage. Thresholds are inclusive lower bounds.
///
/// Out-of-range values are not clamped here; NaN is critical.
pub fn battery_class(level: f64) -> BatteryClass {
    if level >= 80.0 {
        BatteryClass::Full
    } else if level >= 60.0 {
        BatteryClass::High
    } else if level >= 40.0 {
        BatteryClass::Medium
    } else if level >= 20.0 {
        BatteryClass::Low
    } else {
        BatteryClass::Critical
    }
}

/// Width of the fill bar in percent, clamped to `0..=100`.
pub fn battery_fill_percent(level: f64) -> u16 {
    if level.is_nan() {
        return 0;
    }
    level.clamp(0.0, 100.0).round() as u16
}

/// Numeric label, never clamped: `150` renders as `"150%"`.
pub fn battery_label(level: f64) -> String {
    if level.fract() == 0.0 && level.is_finite() {
        format!("{}%", level as i64)
    } else {
        format!("{}%", level)
    }
}
