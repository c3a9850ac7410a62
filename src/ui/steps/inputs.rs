//! Free-text steps and the contact form

use crate::app::App;
use crate::state::{FocusTarget, TextField};
use crate::ui::components::draw_text_field;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

fn label(field: TextField) -> &'static str {
    match field {
        TextField::AnnualRevenue => "Annual Revenue",
        TextField::Website => "Website",
        TextField::FirstName => "First Name",
        TextField::LastName => "Last Name",
        TextField::Email => "Work Email",
        TextField::Phone => "Phone",
    }
}

fn draw_field(frame: &mut Frame, area: Rect, app: &App, field: TextField) {
    draw_text_field(
        frame,
        area,
        label(field),
        app.field_value(field),
        field.placeholder(),
        app.focused() == Some(FocusTarget::Field(field)),
    );
}

/// Revenue and website steps
pub fn draw_single(frame: &mut Frame, area: Rect, app: &App, field: TextField) {
    let [input, note] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

    draw_field(frame, input, app, field);

    if field == TextField::AnnualRevenue {
        let confidential = Paragraph::new("Confidential").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(confidential, note);
    }
}

/// Name, email and phone
pub fn draw_contact(frame: &mut Frame, area: Rect, app: &App) {
    let [names, email, phone] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);
    let [first, last] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(names);

    draw_field(frame, first, app, TextField::FirstName);
    draw_field(frame, last, app, TextField::LastName);
    draw_field(frame, email, app, TextField::Email);
    draw_field(frame, phone, app, TextField::Phone);
}
