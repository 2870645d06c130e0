//! Header: title, backend health, view mode and last refresh.

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::context::RenderContext;
use super::theme::{dim_style, title_style, COLOR_BORDER, COLOR_ERROR, COLOR_SUCCESS};
use crate::app::Screen;

pub const TITLE: &str = "IoT Device Management";
pub const HEADER_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let health_color = if ctx.health.healthy {
        COLOR_SUCCESS
    } else {
        COLOR_ERROR
    };

    let title = match &ctx.screen {
        Screen::Devices => Span::styled(TITLE, title_style()),
        Screen::Detail(id) => Span::styled(format!("Device: {}", id), title_style()),
    };

    let top = Line::from(vec![
        title,
        Span::raw("  "),
        Span::styled("● ", Style::default().fg(health_color)),
        Span::styled(ctx.health.message.clone(), Style::default().fg(health_color)),
    ]);

    let last_refresh = match &ctx.screen {
        Screen::Devices => ctx.directory.last_updated,
        Screen::Detail(_) => ctx.detail.last_updated,
    }
    .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
    .unwrap_or_else(|| "never".to_string());

    let bottom = Line::from(vec![
        Span::styled(ctx.mode.display_name(), Style::default()),
        Span::styled(format!("  │  Last refresh: {}", last_refresh), dim_style()),
        Span::styled(format!("  │  {}", ctx.backend_url), dim_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));

    frame.render_widget(Paragraph::new(vec![top, bottom]).block(block), area);
}
