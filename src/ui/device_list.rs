//! Table renderer for the directory snapshot.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::indicators::{battery_gauge, signal_bars};
use super::theme::{connection_color, COLOR_ACCENT, COLOR_BORDER, COLOR_SELECTED_BG};
use crate::view_model::DeviceView;

pub const COLUMNS: [&str; 5] = [
    "Device ID",
    "Connection State",
    "Last Activity",
    "WiFi Signal Strength",
    "Battery Level",
];

fn row(view: &DeviceView) -> Row<'static> {
    let mut signal = signal_bars(view.signal);
    signal.push(Span::raw(" "));
    signal.push(Span::raw(view.signal_label.clone()));

    Row::new(vec![
        Cell::from(view.device_id.clone()),
        Cell::from(Span::styled(
            view.connection.clone(),
            Style::default().fg(connection_color(view.connected, &view.connection_class)),
        )),
        Cell::from(view.last_activity.clone()),
        Cell::from(Line::from(signal)),
        Cell::from(Line::from(battery_gauge(view.battery.as_ref()))),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, views: &[DeviceView], selected: usize) {
    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(18),
        Constraint::Length(21),
        Constraint::Fill(2),
        Constraint::Length(19),
    ];

    let table = Table::new(views.iter().map(row), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(format!(" Devices ({}) ", views.len())),
        )
        .row_highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}
