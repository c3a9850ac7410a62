//! Application state and key handling

use crate::state::{FocusTarget, ProgressAnimation, Step, StepKind, TextField, Wizard};
use crate::submission::{SubmissionDispatcher, SubmissionOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Wizard controller
    pub wizard: Wizard,
    /// Index into the current step's focus targets
    pub focus: usize,
    /// Error message shown in the dialog overlay
    pub error: Option<String>,
    /// Progress bar transition
    pub progress: ProgressAnimation,
    dispatcher: SubmissionDispatcher,
    outcome_tx: UnboundedSender<SubmissionOutcome>,
    outcome_rx: UnboundedReceiver<SubmissionOutcome>,
    /// Position focus was last reset for
    focus_position: u8,
    quit: bool,
}

impl App {
    pub fn new(dispatcher: SubmissionDispatcher) -> Self {
        let wizard = Wizard::new();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            progress: ProgressAnimation::new(wizard.position().progress()),
            focus_position: wizard.position().get(),
            wizard,
            focus: 0,
            error: None,
            dispatcher,
            outcome_tx,
            outcome_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Focus targets of the current step
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        self.wizard.step().focus_targets()
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus_targets().get(self.focus).copied()
    }

    /// Whether an affordance can be activated right now
    pub fn is_enabled(&self, target: FocusTarget) -> bool {
        let step = self.wizard.step();
        match target {
            FocusTarget::Next => step.can_proceed(self.wizard.form(), self.wizard.is_submitting()),
            FocusTarget::Submit => self.wizard.can_submit(),
            FocusTarget::Choice(_) | FocusTarget::Field(_) | FocusTarget::Back | FocusTarget::Skip => {
                !self.wizard.is_submitting()
            }
        }
    }

    /// Whether the loop should redraw at animation rate
    pub fn is_animating(&self, now: Instant) -> bool {
        self.wizard.has_pending_advance() || self.progress.is_animating(now)
    }

    /// Advance timers and collect finished submissions
    pub fn tick(&mut self, now: Instant) {
        self.wizard.tick(now);

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }

        self.sync_step(now);
    }

    /// Cancel scheduled work before the UI goes away
    pub fn teardown(&mut self) {
        self.wizard.cancel_pending();
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        if let SubmissionOutcome::CallbackFailed(reason) = &outcome {
            self.error = Some(format!("We couldn't submit your details: {reason}"));
        }
        self.wizard.finish_submission(outcome);
    }

    /// Reset focus and retarget the progress bar after a step change
    fn sync_step(&mut self, now: Instant) {
        let ratio = if self.wizard.is_submitted() {
            1.0
        } else {
            self.wizard.position().progress()
        };
        self.progress.retarget(ratio, now);

        let position = self.wizard.position().get();
        if position != self.focus_position {
            self.focus_position = position;
            self.focus = 0;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.error.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error = None;
            }
            return;
        }

        if self.wizard.is_submitted() {
            if matches!(
                key.code,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.quit = true;
            }
            return;
        }

        let editing = matches!(self.focused(), Some(FocusTarget::Field(_)));

        match key.code {
            KeyCode::Down | KeyCode::Tab => self.focus_next(),
            KeyCode::Up | KeyCode::BackTab => self.focus_prev(),
            KeyCode::Char('j') if !editing => self.focus_next(),
            KeyCode::Char('k') if !editing => self.focus_prev(),
            KeyCode::Esc => {
                if self.wizard.step().has_back() {
                    self.wizard.retreat();
                }
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char(' ') if !editing => self.activate(),
            KeyCode::Char(c) if editing && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(|value| value.push(c));
            }
            KeyCode::Backspace if editing => {
                self.edit_focused(|value| {
                    value.pop();
                });
            }
            _ => {}
        }

        self.sync_step(Instant::now());
    }

    fn focus_next(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_prev(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus = if self.focus == 0 { count - 1 } else { self.focus - 1 };
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(FocusTarget::Field(field)) = self.focused() {
            let mut value = self.wizard.form().text(field).to_string();
            edit(&mut value);
            self.wizard.set_text(field, value);
        }
    }

    /// Activate the focused option or button
    fn activate(&mut self) {
        let Some(target) = self.focused() else {
            return;
        };
        if !self.is_enabled(target) {
            return;
        }

        let step = self.wizard.step();
        match target {
            FocusTarget::Choice(index) => self.choose(step, index),
            FocusTarget::Field(_) => self.focus_next(),
            FocusTarget::Back => self.wizard.retreat(),
            FocusTarget::Next | FocusTarget::Skip => self.wizard.advance(),
            FocusTarget::Submit => self.submit(),
        }
    }

    fn choose(&mut self, step: Step, index: usize) {
        match step.kind() {
            StepKind::Single(field, options) => {
                if let Some(option) = options.get(index) {
                    self.wizard.select_single(field, option.value);
                }
            }
            StepKind::Multi(field, options) => {
                if let Some(option) = options.get(index) {
                    self.wizard.toggle_multi(field, option.value);
                }
            }
            StepKind::Text(_) | StepKind::Contact => {}
        }
    }

    /// Start the submission in the background; the loop picks up the outcome
    fn submit(&mut self) {
        let Some(form) = self.wizard.begin_submission() else {
            return;
        };

        let dispatcher = self.dispatcher.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = dispatcher.dispatch(&form).await;
            // The receiver is gone if the UI was torn down meanwhile
            let _ = tx.send(outcome);
        });
    }

    /// Text of a field for rendering
    pub fn field_value(&self, field: TextField) -> &str {
        self.wizard.form().text(field)
    }
}
