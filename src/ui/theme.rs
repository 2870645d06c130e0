//! Color theme for the dashboard.
//!
//! Every category the classifiers produce maps to exactly one color here.

use ratatui::style::{Color, Modifier, Style};

use crate::classify::{BatteryClass, SignalClass};

pub const COLOR_BORDER: Color = Color::DarkGray;
pub const COLOR_ACCENT: Color = Color::White;
pub const COLOR_HEADER: Color = Color::Cyan;
pub const COLOR_DIM: Color = Color::DarkGray;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);
pub const COLOR_WARNING: Color = Color::Yellow;

/// Background of the highlighted row or card.
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 40, 70);

pub fn connection_color(connected: bool, class: &str) -> Color {
    if connected {
        COLOR_SUCCESS
    } else if class == "disconnected" {
        COLOR_ERROR
    } else {
        COLOR_WARNING
    }
}

pub fn signal_color(class: SignalClass) -> Color {
    match class {
        SignalClass::Excellent => COLOR_SUCCESS,
        SignalClass::Good => Color::LightGreen,
        SignalClass::Fair => COLOR_WARNING,
        SignalClass::Weak => COLOR_ERROR,
        SignalClass::None => COLOR_DIM,
    }
}

pub fn battery_color(class: BatteryClass) -> Color {
    match class {
        BatteryClass::Full => COLOR_SUCCESS,
        BatteryClass::High => Color::LightGreen,
        BatteryClass::Medium => COLOR_WARNING,
        BatteryClass::Low => Color::LightRed,
        BatteryClass::Critical => COLOR_ERROR,
    }
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(COLOR_DIM)
}

pub fn error_style() -> Style {
    Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)
}
