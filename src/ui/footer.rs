//! Key hints.

use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use super::context::RenderContext;
use super::theme::dim_style;
use crate::app::Screen;

pub fn hints(ctx: &RenderContext) -> &'static str {
    match ctx.screen {
        Screen::Devices if ctx.click_through => {
            "↑/↓ select · Enter details · v toggle · l list · c cards · q quit"
        }
        Screen::Devices => "↑/↓ select · v toggle · l list · c cards · q quit",
        Screen::Detail(_) => "Esc back to devices · q quit",
    }
}

pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    frame.render_widget(Paragraph::new(Line::styled(hints(ctx), dim_style())), area);
}
