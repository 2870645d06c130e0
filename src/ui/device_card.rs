//! Card grid renderer for the directory snapshot.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::indicators::{battery_gauge, signal_bars, truncate_to_width};
use super::theme::{connection_color, dim_style, COLOR_ACCENT, COLOR_BORDER};

use crate::view_model::DeviceView;

pub const CARD_WIDTH: u16 = 34;
pub const CARD_HEIGHT: u16 = 6;

/// Grid shape for `area`: (columns, visible rows).
pub fn grid(area: Rect) -> (usize, usize) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    (columns, rows)
}

/// First grid row to draw so `selected` stays visible.
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let selected_row = selected / columns.max(1);
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

fn card_lines(view: &DeviceView) -> Vec<Line<'static>> {
    let mut signal = vec![Span::styled("WiFi Signal:   ", dim_style())];
    signal.extend(signal_bars(view.signal));
    signal.push(Span::raw(format!(" {}", view.signal_label)));

    let mut battery = vec![Span::styled("Battery Level: ", dim_style())];
    battery.extend(battery_gauge(view.battery.as_ref()));

    vec![
        Line::from(vec![
            Span::styled("Last Activity: ", dim_style()),
            Span::raw(view.last_activity.clone()),
        ]),
        Line::from(signal),
        Line::from(battery),
    ]
}

fn render_card(frame: &mut Frame, area: Rect, view: &DeviceView, selected: bool) {
    let border = if selected {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_BORDER)
    };

    // Borders, padding and the connection label share the title row.
    let id_width = (area.width as usize).saturating_sub(view.connection.len() + 5);
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", truncate_to_width(&view.device_id, id_width)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", view.connection),
            Style::default().fg(connection_color(view.connected, &view.connection_class)),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    frame.render_widget(Paragraph::new(card_lines(view)).block(block), area);
}

pub fn render(frame: &mut Frame, area: Rect, views: &[DeviceView], selected: usize) {
    if area.is_empty() {
        return;
    }
    let (columns, visible_rows) = grid(area);
    let first_row = first_visible_row(selected, columns, visible_rows);
    let width = area.width / columns as u16;

    for (index, view) in views.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;
        let card = Rect {
            x: area.x + col as u16 * width,
            y: area.y + row as u16 * CARD_HEIGHT,
            width,
            height: CARD_HEIGHT.min(area.height),
        };
        render_card(frame, card, view, index == selected);
    }
}
