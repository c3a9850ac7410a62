//! Step views: one rendering per wizard step plus its navigation buttons

mod choices;
mod inputs;

use crate::app::App;
use crate::state::{FocusTarget, Step, StepKind};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const CONSENT_DISCLAIMER: &str = "By choosing the button above, you consent for ClientUp Group and \
partners to use automated technology, including pre-recorded messages, cell phones, texts, and \
emails to contact you at the number and email address provided. This includes if the number is \
currently on any Do Not Call Lists. This consent is not required to make a purchase. Privacy Policy.";

/// Draw the current step
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.step();
    let footer_height = if step == Step::Contact { 6 } else { 0 };

    let [header, body, controls, footer] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(3),
        Constraint::Length(BUTTON_HEIGHT),
        Constraint::Length(footer_height),
    ])
    .areas(area);

    draw_header(frame, header, step);

    match step.kind() {
        StepKind::Single(field, options) => {
            let selected = app.wizard.form().single(field);
            choices::draw(frame, body, app, options, |value| selected == Some(value), false);
        }
        StepKind::Multi(field, options) => {
            let selected = app.wizard.form().multi(field);
            choices::draw(
                frame,
                body,
                app,
                options,
                |value| selected.iter().any(|v| v == value),
                true,
            );
        }
        StepKind::Text(field) => inputs::draw_single(frame, body, app, field),
        StepKind::Contact => inputs::draw_contact(frame, body, app),
    }

    draw_controls(frame, controls, app);

    if footer_height > 0 {
        let disclaimer = Paragraph::new(CONSENT_DISCLAIMER)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(disclaimer, footer);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, step: Step) {
    let lines = vec![
        Line::from(Span::styled(
            step.heading(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(step.prompt(), Style::default().fg(Color::Gray))),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(header, area);
}

/// Label for a navigation affordance
fn button_label(app: &App, target: FocusTarget) -> Option<String> {
    let label = match target {
        FocusTarget::Back => "← Back".to_string(),
        FocusTarget::Next => "Next →".to_string(),
        FocusTarget::Skip => format!("{} →", app.wizard.step().skip_label()?),
        FocusTarget::Submit if app.wizard.is_submitting() => "Submitting...".to_string(),
        FocusTarget::Submit => "Next: Book a call".to_string(),
        FocusTarget::Choice(_) | FocusTarget::Field(_) => return None,
    };
    Some(label)
}

fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let buttons: Vec<(FocusTarget, String)> = app
        .focus_targets()
        .into_iter()
        .filter_map(|target| button_label(app, target).map(|label| (target, label)))
        .collect();

    if buttons.is_empty() {
        return;
    }

    let constraints = buttons
        .iter()
        .map(|(_, label)| Constraint::Length(label.chars().count() as u16 + 6));
    let chunks = Layout::horizontal(constraints)
        .flex(ratatui::layout::Flex::Center)
        .spacing(2)
        .split(area);

    let focused = app.focused();
    for ((target, label), chunk) in buttons.iter().zip(chunks.iter()) {
        let accent = matches!(target, FocusTarget::Submit).then_some(Color::Green);
        render_button(
            frame,
            *chunk,
            label,
            focused == Some(*target),
            app.is_enabled(*target),
            accent,
        );
    }
}
