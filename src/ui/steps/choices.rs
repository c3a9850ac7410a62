//! Single and multi-select option lists

use crate::app::App;
use crate::state::{ChoiceOption, FocusTarget};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{HighlightSpacing, List, ListItem},
    Frame,
};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    options: &[ChoiceOption],
    is_selected: impl Fn(&str) -> bool,
    multi: bool,
) {
    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let selected = is_selected(option.value);
            let marker = match (multi, selected) {
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
                (false, true) => "(•) ",
                (false, false) => "( ) ",
            };
            let title_style = if selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(marker, title_style),
                Span::styled(option.title, title_style),
            ])];
            if let Some(subtitle) = option.subtitle {
                lines.push(Line::from(Span::styled(
                    format!("    {subtitle}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let focused = match app.focused() {
        Some(FocusTarget::Choice(index)) => Some(index),
        _ => None,
    };

    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("› ")
        .highlight_spacing(HighlightSpacing::Always);

    render_scrollable_list(frame, area, list, focused);
}
