//! Single-line text input rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a bordered text input with a cursor when active
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
    let spans = match (value.is_empty(), is_active) {
        // Cursor sits before the placeholder while the field is empty
        (true, true) => vec![
            cursor,
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ],
        (true, false) => vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))],
        (false, true) => vec![Span::raw(value), cursor],
        (false, false) => vec![Span::raw(value)],
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
