//! Best-effort submission of a completed lead

use super::callback::LeadCallback;
use super::payload::LeadPayload;
use super::webhook::{HttpWebhookClient, WebhookClient};
use crate::state::FormState;
use std::sync::Arc;
use uuid::Uuid;

/// Result of one submission attempt as seen by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Local processing finished; webhook failures are folded in here
    Completed,
    /// The host callback failed, so the webhook was not called
    CallbackFailed(String),
}

/// Calls the host callback and POSTs the payload to the webhook
#[derive(Clone)]
pub struct SubmissionDispatcher {
    webhook_url: Option<String>,
    callback: Option<Arc<dyn LeadCallback>>,
    client: Arc<dyn WebhookClient>,
}

impl SubmissionDispatcher {
    pub fn new(webhook_url: Option<String>, callback: Option<Arc<dyn LeadCallback>>) -> Self {
        Self {
            webhook_url,
            callback,
            client: Arc::new(HttpWebhookClient::new()),
        }
    }

    /// Replace the webhook transport
    pub fn with_client(mut self, client: Arc<dyn WebhookClient>) -> Self {
        self.client = client;
        self
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    /// Run the callback, then the webhook. Never fails on webhook errors.
    pub async fn dispatch(&self, form: &FormState) -> SubmissionOutcome {
        let submission_id = Uuid::new_v4();
        tracing::info!(%submission_id, "Submitting lead");

        if let Some(callback) = &self.callback {
            if let Err(err) = callback.on_submit(form) {
                tracing::error!(%submission_id, "Submit callback failed: {err:#}");
                return SubmissionOutcome::CallbackFailed(format!("{err:#}"));
            }
        }

        if let Some(url) = &self.webhook_url {
            let payload = LeadPayload::from_form(form);
            match self.client.post_lead(url, &payload).await {
                Ok(()) => tracing::info!(%submission_id, "Lead delivered to webhook"),
                Err(err) => tracing::error!(%submission_id, "Submission error: {err}"),
            }
        }

        SubmissionOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{MockWebhookClient, SubmitError};
    use anyhow::anyhow;
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn lead() -> FormState {
        FormState {
            insurance_lines: vec!["Life".into(), "Health".into()],
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_posts_payload_to_configured_url() {
        let mut client = MockWebhookClient::new();
        client
            .expect_post_lead()
            .with(
                eq("https://hooks.example/lead"),
                eq(LeadPayload::from_form(&lead())),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let dispatcher =
            SubmissionDispatcher::new(Some("https://hooks.example/lead".into()), None)
                .with_client(Arc::new(client));

        assert_eq!(dispatcher.dispatch(&lead()).await, SubmissionOutcome::Completed);
    }

    #[tokio::test]
    async fn test_no_url_means_no_request() {
        let mut client = MockWebhookClient::new();
        client.expect_post_lead().never();

        let dispatcher = SubmissionDispatcher::new(None, None).with_client(Arc::new(client));

        assert_eq!(dispatcher.dispatch(&lead()).await, SubmissionOutcome::Completed);
    }

    #[tokio::test]
    async fn test_webhook_failure_is_swallowed() {
        let mut client = MockWebhookClient::new();
        client
            .expect_post_lead()
            .times(1)
            .returning(|_, _| Err(SubmitError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)));

        let dispatcher = SubmissionDispatcher::new(Some("https://hooks.example".into()), None)
            .with_client(Arc::new(client));

        assert_eq!(dispatcher.dispatch(&lead()).await, SubmissionOutcome::Completed);
    }

    #[tokio::test]
    async fn test_callback_runs_before_webhook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let callback = move |form: &FormState| -> anyhow::Result<()> {
            assert_eq!(form.insurance_lines, vec!["Life", "Health"]);
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        let mut client = MockWebhookClient::new();
        let observed = Arc::clone(&calls);
        client.expect_post_lead().times(1).returning(move |_, _| {
            assert_eq!(observed.load(Ordering::SeqCst), 1);
            Ok(())
        });

        let dispatcher = SubmissionDispatcher::new(
            Some("https://hooks.example".into()),
            Some(Arc::new(callback)),
        )
        .with_client(Arc::new(client));

        assert_eq!(dispatcher.dispatch(&lead()).await, SubmissionOutcome::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_failure_skips_webhook() {
        let mut client = MockWebhookClient::new();
        client.expect_post_lead().never();

        let failing = |_: &FormState| -> anyhow::Result<()> { Err(anyhow!("crm offline")) };
        let dispatcher = SubmissionDispatcher::new(
            Some("https://hooks.example".into()),
            Some(Arc::new(failing)),
        )
        .with_client(Arc::new(client));

        let outcome = tokio_test::block_on(dispatcher.dispatch(&lead()));
        assert_eq!(
            outcome,
            SubmissionOutcome::CallbackFailed("crm offline".to_string())
        );
    }
}
