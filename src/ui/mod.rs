//! UI module for rendering the TUI

mod components;
mod confirmation;
mod progress;
mod steps;
mod widgets;

use crate::app::App;
use crate::state::TOTAL_STEPS;
use components::render_error_dialog;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Widest the wizard content grows on large terminals
const MAX_CONTENT_WIDTH: u16 = 76;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let [progress_area, body, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let label = if app.wizard.is_submitted() {
        "Complete".to_string()
    } else {
        format!("Step {} of {TOTAL_STEPS}", app.wizard.position().get())
    };
    progress::draw(
        frame,
        progress_area,
        app.progress.value_at(Instant::now()),
        label,
    );

    let content = centered(body, MAX_CONTENT_WIDTH);
    if app.wizard.is_submitted() {
        confirmation::draw(frame, content);
    } else {
        steps::draw(frame, content, app);
    }

    draw_help(frame, help, app);

    if let Some(error) = &app.error {
        render_error_dialog(frame, error);
    }
}

/// Horizontally center a column with one row of top margin
fn centered(area: Rect, max_width: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(max_width)])
        .flex(Flex::Center)
        .areas(area);
    Rect {
        y: column.y + 1,
        height: column.height.saturating_sub(1),
        ..column
    }
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);

    let spans = if app.wizard.is_submitted() {
        vec![Span::styled("Enter", key), Span::styled(" close", text)]
    } else {
        let mut spans = vec![
            Span::styled("↑/↓", key),
            Span::styled(" move  ", text),
            Span::styled("Enter", key),
            Span::styled(" select  ", text),
        ];
        if app.wizard.step().has_back() {
            spans.push(Span::styled("Esc", key));
            spans.push(Span::styled(" back  ", text));
        }
        spans.push(Span::styled("Ctrl+C", key));
        spans.push(Span::styled(" quit", text));
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
