//! Terminal rendering.
//!
//! Everything is drawn from a [`RenderContext`] snapshot:
//! - header with title, backend health, view mode and last refresh
//! - devices screen as a table ([`ViewMode::List`]) or card grid
//!   ([`ViewMode::Card`]), both fed the same [`DeviceView`] rows
//! - detail screen for one device
//! - footer with key hints

mod context;
mod device_card;
mod device_detail;
mod device_list;
mod footer;
mod header;
mod indicators;
mod theme;

pub use context::RenderContext;
pub use header::TITLE;
pub use theme::{battery_color, connection_color, signal_color};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::view_mode::ViewMode;
use crate::view_model::device_views;
use theme::{dim_style, error_style};

pub const LOADING_DEVICES: &str = "Loading devices...";
pub const NO_DEVICES: &str = "No devices found.";

/// Render the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    draw(frame, &RenderContext::from_app(app));
}

pub fn draw(frame: &mut Frame, ctx: &RenderContext) {
    let [header_area, body, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    header::render(frame, header_area, ctx);
    match ctx.screen {
        Screen::Devices => render_devices(frame, body, ctx),
        Screen::Detail(_) => device_detail::render(frame, body, ctx),
    }
    footer::render(frame, footer_area, ctx);
}

fn render_devices(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let directory = &ctx.directory;
    if directory.loading {
        centered_message(frame, area, LOADING_DEVICES, dim_style());
        return;
    }

    let banner_height = if directory.error.is_some() { 2 } else { 0 };
    let [banner, content] =
        Layout::vertical([Constraint::Length(banner_height), Constraint::Min(0)]).areas(area);

    if let Some(error) = &directory.error {
        frame.render_widget(
            Paragraph::new(Line::styled(error.clone(), error_style())).wrap(Wrap { trim: true }),
            banner,
        );
    }

    if directory.devices.is_empty() {
        centered_message(frame, content, NO_DEVICES, dim_style());
        return;
    }

    let views = device_views(&directory.devices);
    let selected = ctx.selected.min(views.len() - 1);
    match ctx.mode {
        ViewMode::List => device_list::render(frame, content, &views, selected),
        ViewMode::Card => device_card::render(frame, content, &views, selected),
    }
}

pub(crate) fn centered_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled(message.to_string(), style)).alignment(Alignment::Center),
        middle,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::{ConnectionState, Device, DeviceTwin};
    use crate::sync::{DetailState, DirectoryState};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn draw_to_string(ctx: &RenderContext, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, ctx)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn settled(devices: Vec<Device>) -> DirectoryState {
        let mut state = DirectoryState::default();
        state.apply(Ok(devices));
        state
    }

    fn sample_devices() -> Vec<Device> {
        vec![
            Device::new("sensor-01", ConnectionState::Connected)
                .with_last_activity("2024-01-01T00:00:00Z")
                .with_wifi("Excellent")
                .with_battery(92.0),
            Device::new("sensor-02", ConnectionState::Disconnected),
        ]
    }

    #[test]
    fn test_loading_devices() {
        let ctx = RenderContext::for_devices(DirectoryState::default(), ViewMode::List);
        let screen = draw_to_string(&ctx, 100, 20);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(LOADING_DEVICES));
    }

    #[test]
    fn test_empty_snapshot() {
        let ctx = RenderContext::for_devices(settled(Vec::new()), ViewMode::List);
        assert!(draw_to_string(&ctx, 100, 20).contains(NO_DEVICES));
    }

    #[test]
    fn test_list_view_shows_columns_and_rows() {
        let ctx = RenderContext::for_devices(settled(sample_devices()), ViewMode::List);
        let screen = draw_to_string(&ctx, 140, 20);

        assert!(screen.contains("Device ID"));
        assert!(screen.contains("Battery Level"));
        assert!(screen.contains("sensor-01"));
        assert!(screen.contains("Disconnected"));
        assert!(screen.contains("92%"));
        assert!(screen.contains("Unknown"));
        assert!(screen.contains("List View"));
    }

    #[test]
    fn test_card_view() {
        let ctx = RenderContext::for_devices(settled(sample_devices()), ViewMode::Card);
        let screen = draw_to_string(&ctx, 100, 20);

        assert!(screen.contains("sensor-02"));
        assert!(screen.contains("WiFi Signal:"));
        assert!(screen.contains("Card View"));
        assert!(!screen.contains("Device ID"));
    }

    #[test]
    fn test_error_banner_keeps_devices() {
        let mut directory = settled(sample_devices());
        directory.apply(Err(FetchError::Upstream("IoT Hub throttled".into())));

        let ctx = RenderContext::for_devices(directory, ViewMode::List);
        let screen = draw_to_string(&ctx, 140, 20);
        assert!(screen.contains("IoT Hub throttled"));
        assert!(screen.contains("sensor-01"));
    }

    fn detail_ctx(detail: DetailState, id: &str) -> RenderContext {
        let mut ctx = RenderContext::for_devices(DirectoryState::default(), ViewMode::List);
        ctx.screen = Screen::Detail(id.to_string());
        ctx.detail = detail;
        ctx
    }

    fn detail_for(id: &str) -> DetailState {
        DetailState {
            device_id: Some(id.to_string()),
            loading: true,
            ..DetailState::default()
        }
    }

    #[test]
    fn test_detail_loading() {
        let screen = draw_to_string(&detail_ctx(detail_for("d1"), "d1"), 100, 20);
        assert!(screen.contains("Loading device details..."));
    }

    #[test]
    fn test_detail_not_found() {
        let mut state = detail_for("missing");
        state.apply(Err(FetchError::NotFound {
            resource: "missing".into(),
        }));

        let screen = draw_to_string(&detail_ctx(state, "missing"), 100, 20);
        assert!(screen.contains("Device missing not found"));
    }

    #[test]
    fn test_detail_failed() {
        let mut state = detail_for("d1");
        state.apply(Err(FetchError::BadStatus { status: 500 }));

        let screen = draw_to_string(&detail_ctx(state, "d1"), 100, 20);
        assert!(screen.contains("Error: Failed to fetch device with ID: d1"));
    }

    #[test]
    fn test_detail_sections() {
        let twin = DeviceTwin::from_value(json!({
            "deviceId": "d1",
            "connectionState": "Connected",
            "properties": {"reported": {"wifiSignalStrength": "Fair", "batteryLevel": 35}}
        }))
        .unwrap();
        let mut state = detail_for("d1");
        state.apply(Ok(twin));

        let screen = draw_to_string(&detail_ctx(state, "d1"), 100, 30);
        assert!(screen.contains("Device: d1"));
        assert!(screen.contains("Status Information"));
        assert!(screen.contains("Device Health"));
        assert!(screen.contains("Additional Properties"));
        assert!(screen.contains("35%"));
        assert!(screen.contains("\"batteryLevel\": 35"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let ctx = RenderContext::for_devices(settled(sample_devices()), ViewMode::Card);
        draw_to_string(&ctx, 10, 4);
    }
}
