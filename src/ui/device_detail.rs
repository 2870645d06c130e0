//! Detail screen for one device.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::context::RenderContext;
use super::indicators::{battery_gauge, signal_bars};
use super::theme::{connection_color, dim_style, error_style, COLOR_ACCENT, COLOR_BORDER};
use super::centered_message;
use crate::models::DeviceTwin;
use crate::sync::DetailStatus;
use crate::view_model::DetailView;

pub const LOADING: &str = "Loading device details...";

fn section(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<18}", text), dim_style())
}

pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let id = ctx.screen.device_id().unwrap_or_default();
    let state = &ctx.detail;

    match state.status() {
        DetailStatus::Idle | DetailStatus::Loading => centered_message(frame, area, LOADING, dim_style()),
        DetailStatus::NotFound => {
            let message = format!("Device {} not found", id);
            centered_message(frame, area, &message, error_style());
        }
        DetailStatus::Failed => {
            let message = state
                .error
                .clone()
                .unwrap_or_else(|| "Device not found".to_string());
            centered_message(frame, area, &message, error_style());
        }
        DetailStatus::Ready => {
            if let Some(twin) = &state.device {
                render_twin(frame, area, twin, state.error.as_deref());
            }
        }
    }
}

fn render_twin(frame: &mut Frame, area: Rect, twin: &DeviceTwin, error: Option<&str>) {
    let view = DetailView::from_twin(twin);
    let summary = &view.summary;

    let banner_height = if error.is_some() { 1 } else { 0 };
    let [banner, status_area, health_area, props_area] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Length(4 + view.status.is_some() as u16),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(area);

    if let Some(message) = error {
        frame.render_widget(Paragraph::new(Line::styled(message.to_string(), error_style())), banner);
    }

    let mut status_lines = vec![
        Line::from(vec![
            label("Connection State:"),
            Span::styled(
                summary.connection.clone(),
                Style::default().fg(connection_color(summary.connected, &summary.connection_class)),
            ),
        ]),
        Line::from(vec![label("Last Activity:"), Span::raw(summary.last_activity.clone())]),
    ];
    if let Some(status) = &view.status {
        let text = match &view.status_reason {
            Some(reason) => format!("{} ({})", status, reason),
            None => status.clone(),
        };
        status_lines.push(Line::from(vec![label("Status:"), Span::raw(text)]));
    }
    frame.render_widget(
        Paragraph::new(status_lines).block(section("Status Information")),
        status_area,
    );

    let mut signal = vec![label("WiFi Signal:")];
    signal.extend(signal_bars(summary.signal));
    signal.push(Span::raw(format!(" {}", summary.signal_label)));
    let mut battery = vec![label("Battery Level:")];
    battery.extend(battery_gauge(summary.battery.as_ref()));
    frame.render_widget(
        Paragraph::new(vec![Line::from(signal), Line::from(battery)]).block(section("Device Health")),
        health_area,
    );

    if let Some(json) = &view.properties_json {
        frame.render_widget(
            Paragraph::new(json.as_str())
                .wrap(Wrap { trim: false })
                .block(section("Additional Properties")),
            props_area,
        );
    }
}
