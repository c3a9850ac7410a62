//! Wizard controller: step position, collected fields and submission flags

use super::form::{FieldUpdate, FormState, MultiField, SingleField, TextField};
use super::step::{Step, WizardPosition};
#[cfg(test)]
use crate::submission::SubmissionDispatcher;
use crate::submission::SubmissionOutcome;
use std::time::{Duration, Instant};

/// Delay between a single-choice selection and the automatic step forward
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(300);

/// The stateful core of the intake funnel
#[derive(Debug, Default)]
pub struct Wizard {
    form: FormState,
    position: WizardPosition,
    submitting: bool,
    submitted: bool,
    /// Deadline of the scheduled auto-advance, if any
    pending_advance: Option<Instant>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    pub fn step(&self) -> Step {
        self.position.step()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Form is frozen once submission has started
    fn locked(&self) -> bool {
        self.submitting || self.submitted
    }

    /// Single entry point for all field mutations
    pub fn apply(&mut self, update: FieldUpdate) {
        if self.locked() {
            tracing::debug!("Ignoring {update:?} after submission started");
            return;
        }
        self.form.apply(update);
    }

    /// Set a single-choice field and schedule the step forward
    pub fn select_single(&mut self, field: SingleField, value: impl Into<String>) {
        self.select_single_at(field, value, Instant::now());
    }

    pub(crate) fn select_single_at(
        &mut self,
        field: SingleField,
        value: impl Into<String>,
        now: Instant,
    ) {
        if self.locked() {
            return;
        }
        self.apply(FieldUpdate::select(field, value));
        self.pending_advance = Some(now + AUTO_ADVANCE_DELAY);
    }

    pub fn toggle_multi(&mut self, field: MultiField, value: impl Into<String>) {
        self.apply(FieldUpdate::toggle(field, value));
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.apply(FieldUpdate::text(field, value));
    }

    pub fn advance(&mut self) {
        if self.locked() {
            return;
        }
        self.position.advance();
    }

    pub fn retreat(&mut self) {
        if self.locked() {
            return;
        }
        self.position.retreat();
    }

    /// Fire the scheduled auto-advance once its deadline has passed.
    ///
    /// Returns true when the step changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_advance {
            Some(due) if now >= due => {
                self.pending_advance = None;
                let before = self.position;
                self.advance();
                before != self.position
            }
            _ => false,
        }
    }

    /// Drop any scheduled auto-advance
    pub fn cancel_pending(&mut self) {
        self.pending_advance = None;
    }

    /// Whether the submit affordance is enabled
    pub fn can_submit(&self) -> bool {
        self.step() == Step::Contact && Step::Contact.can_proceed(&self.form, self.submitting)
    }

    /// Mark submission as started and hand out the form to send.
    ///
    /// Returns `None` while a submission is already in flight or done.
    pub fn begin_submission(&mut self) -> Option<FormState> {
        if self.locked() {
            tracing::debug!("Submission already in progress");
            return None;
        }
        self.submitting = true;
        self.pending_advance = None;
        Some(self.form.clone())
    }

    /// Record the outcome of a submission started with [`Self::begin_submission`]
    pub fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        if !self.submitting {
            return;
        }
        self.submitting = false;
        match outcome {
            SubmissionOutcome::Completed => {
                self.submitted = true;
                self.form = FormState::default();
            }
            SubmissionOutcome::CallbackFailed(reason) => {
                tracing::warn!("Lead stays on the contact step: {reason}");
            }
        }
    }

    /// Submit the lead in one go, waiting for the dispatcher to settle
    #[cfg(test)]
    pub async fn submit(&mut self, dispatcher: &SubmissionDispatcher) -> Option<SubmissionOutcome> {
        let form = self.begin_submission()?;
        let outcome = dispatcher.dispatch(&form).await;
        self.finish_submission(outcome.clone());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::step::TOTAL_STEPS;
    use crate::submission::{HttpWebhookClient, MockWebhookClient};
    use std::sync::Arc;

    fn at_contact_step() -> Wizard {
        let mut wizard = Wizard::new();
        for _ in 1..TOTAL_STEPS {
            wizard.advance();
        }
        wizard.set_text(TextField::FirstName, "Ada");
        wizard.set_text(TextField::LastName, "Lovelace");
        wizard.set_text(TextField::Email, "ada@example.com");
        wizard.set_text(TextField::Phone, "+1 555 0100");
        wizard
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_initial_state() {
            let wizard = Wizard::new();
            assert_eq!(wizard.position().get(), 1);
            assert!(!wizard.is_submitting());
            assert!(!wizard.is_submitted());
            assert_eq!(wizard.form(), &FormState::default());
        }

        #[test]
        fn test_back_and_next_stay_in_bounds() {
            let mut wizard = Wizard::new();
            wizard.retreat();
            assert_eq!(wizard.position().get(), 1);
            for _ in 0..12 {
                wizard.advance();
            }
            assert_eq!(wizard.position().get(), TOTAL_STEPS);
            for _ in 0..12 {
                wizard.retreat();
            }
            assert_eq!(wizard.position().get(), 1);
        }
    }

    mod auto_advance {
        use super::*;

        #[test]
        fn test_select_yes_advances_after_delay() {
            let mut wizard = Wizard::new();
            let now = Instant::now();
            wizard.select_single_at(SingleField::InsuranceIndustry, "yes", now);

            assert_eq!(wizard.form().insurance_industry.as_deref(), Some("yes"));
            assert!(!wizard.tick(now + Duration::from_millis(299)));
            assert_eq!(wizard.position().get(), 1);

            assert!(wizard.tick(now + AUTO_ADVANCE_DELAY));
            assert_eq!(wizard.position().get(), 2);
            assert!(!wizard.has_pending_advance());
        }

        #[test]
        fn test_reselecting_overwrites_and_advances_once() {
            let mut wizard = Wizard::new();
            let now = Instant::now();
            wizard.select_single_at(SingleField::InsuranceIndustry, "yes", now);
            wizard.select_single_at(
                SingleField::InsuranceIndustry,
                "no",
                now + Duration::from_millis(100),
            );

            assert!(!wizard.tick(now + AUTO_ADVANCE_DELAY));
            assert!(wizard.tick(now + Duration::from_millis(400)));
            assert!(!wizard.tick(now + Duration::from_secs(5)));

            assert_eq!(wizard.position().get(), 2);
            assert_eq!(wizard.form().insurance_industry.as_deref(), Some("no"));
        }

        #[test]
        fn test_cancelled_advance_never_fires() {
            let mut wizard = Wizard::new();
            let now = Instant::now();
            wizard.select_single_at(SingleField::InsuranceIndustry, "yes", now);
            wizard.cancel_pending();

            assert!(!wizard.tick(now + Duration::from_secs(1)));
            assert_eq!(wizard.position().get(), 1);
        }

        #[test]
        fn test_select_single_uses_wall_clock() {
            let mut wizard = Wizard::new();
            wizard.select_single(SingleField::InsuranceIndustry, "no");
            assert!(wizard.has_pending_advance());
            assert!(!wizard.tick(Instant::now()));
            assert!(wizard.tick(Instant::now() + AUTO_ADVANCE_DELAY));
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_cannot_submit_with_missing_contact() {
            let mut wizard = at_contact_step();
            assert!(wizard.can_submit());
            wizard.set_text(TextField::Phone, "");
            assert!(!wizard.can_submit());
        }

        #[test]
        fn test_begin_submission_is_guarded() {
            let mut wizard = at_contact_step();
            assert!(wizard.begin_submission().is_some());
            assert!(wizard.is_submitting());
            assert!(!wizard.can_submit());
            assert!(wizard.begin_submission().is_none());
        }

        #[test]
        fn test_form_frozen_while_submitting() {
            let mut wizard = at_contact_step();
            wizard.begin_submission();
            wizard.set_text(TextField::Email, "changed@example.com");
            wizard.retreat();
            assert_eq!(wizard.form().email, "ada@example.com");
            assert_eq!(wizard.position().get(), TOTAL_STEPS);
        }

        #[test]
        fn test_callback_failure_keeps_contact_step() {
            let mut wizard = at_contact_step();
            wizard.begin_submission();
            wizard.finish_submission(SubmissionOutcome::CallbackFailed("boom".into()));

            assert!(!wizard.is_submitting());
            assert!(!wizard.is_submitted());
            assert_eq!(wizard.step(), Step::Contact);
            assert!(wizard.can_submit());
        }

        #[tokio::test]
        async fn test_unreachable_webhook_still_completes() {
            let mut wizard = at_contact_step();
            let dispatcher =
                SubmissionDispatcher::new(Some("http://127.0.0.1:9/lead".into()), None)
                    .with_client(Arc::new(HttpWebhookClient::new()));

            let outcome = wizard.submit(&dispatcher).await;

            assert_eq!(outcome, Some(SubmissionOutcome::Completed));
            assert!(wizard.is_submitted());
            assert!(!wizard.is_submitting());
        }

        #[tokio::test]
        async fn test_second_submit_while_in_flight_sends_nothing() {
            let mut client = MockWebhookClient::new();
            client.expect_post_lead().times(1).returning(|_, _| Ok(()));
            let dispatcher = SubmissionDispatcher::new(Some("https://hooks.example".into()), None)
                .with_client(Arc::new(client));

            let mut wizard = at_contact_step();
            let form = wizard.begin_submission().unwrap();

            // A second press while the first request is in flight
            assert_eq!(wizard.submit(&dispatcher).await, None);

            let outcome = dispatcher.dispatch(&form).await;
            wizard.finish_submission(outcome);
            assert!(wizard.is_submitted());

            // And after completion
            assert_eq!(wizard.submit(&dispatcher).await, None);
        }
    }
}
