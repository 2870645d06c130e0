//! Signal bars and battery gauge.

use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{battery_color, signal_color, COLOR_DIM};
use crate::classify::SignalClass;
use crate::view_model::{BatteryReading, UNKNOWN_BATTERY};

const BAR_GLYPHS: [char; 4] = ['▂', '▄', '▆', '█'];
const GAUGE_CELLS: u16 = 10;

/// Four bars, lit according to the class.
pub fn signal_bars(class: SignalClass) -> Vec<Span<'static>> {
    let lit = class.bars() as usize;
    let color = signal_color(class);
    BAR_GLYPHS
        .iter()
        .enumerate()
        .map(|(i, glyph)| {
            let style = if i < lit {
                Style::default().fg(color)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            Span::styled(glyph.to_string(), style)
        })
        .collect()
}

/// Number of filled gauge cells for a fill percentage.
pub fn gauge_cells(fill_percent: u16) -> u16 {
    (fill_percent.min(100) * GAUGE_CELLS + 50) / 100
}

/// `[█████░░░░░] 50%`, or "Unknown" without a reading.
pub fn battery_gauge(reading: Option<&BatteryReading>) -> Vec<Span<'static>> {
    let Some(reading) = reading else {
        return vec![Span::styled(UNKNOWN_BATTERY, Style::default().fg(COLOR_DIM))];
    };

    let filled = gauge_cells(reading.fill_percent);
    let color = battery_color(reading.class);
    vec![
        Span::styled("[", Style::default().fg(COLOR_DIM)),
        Span::styled("█".repeat(filled as usize), Style::default().fg(color)),
        Span::styled(
            "░".repeat((GAUGE_CELLS - filled) as usize),
            Style::default().fg(COLOR_DIM),
        ),
        Span::styled("] ", Style::default().fg(COLOR_DIM)),
        Span::styled(reading.label.clone(), Style::default().fg(color)),
    ]
}

/// Truncate to at most `max_width` display columns, ending with "...".
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let target = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(1);
        if width + w > target {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(&".".repeat(max_width.min(3)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_gauge_cells() {
        assert_eq!(gauge_cells(0), 0);
        assert_eq!(gauge_cells(4), 0);
        assert_eq!(gauge_cells(5), 1);
        assert_eq!(gauge_cells(50), 5);
        assert_eq!(gauge_cells(100), 10);
        assert_eq!(gauge_cells(250), 10);
    }

    #[test]
    fn test_battery_gauge_overflow_label_unclamped() {
        let spans = battery_gauge(Some(&BatteryReading::new(150.0)));
        assert_eq!(text(&spans), "[██████████] 150%");
    }

    #[test]
    fn test_battery_gauge_unknown() {
        assert_eq!(text(&battery_gauge(None)), "Unknown");
    }

    #[test]
    fn test_signal_bars_always_four() {
        for class in SignalClass::ALL {
            assert_eq!(signal_bars(class).len(), 4);
        }
        assert_eq!(text(&signal_bars(SignalClass::Weak)), "▂▄▆█");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("sensor-1", 20), "sensor-1");
        assert_eq!(truncate_to_width("warehouse-sensor-0042", 12), "warehouse...");
        assert_eq!(truncate_to_width("abc", 2), "..");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns.
        let out = truncate_to_width("温度センサー", 7);
        assert_eq!(out, "温度...");
        assert!(out.width() <= 7);
    }
}
