//! Webhook delivery over HTTP

use super::error::SubmitError;
use super::payload::LeadPayload;
use async_trait::async_trait;

/// Trait for webhook delivery, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// POST the payload as JSON to `url`
    async fn post_lead(&self, url: &str, payload: &LeadPayload) -> Result<(), SubmitError>;
}

/// `reqwest`-backed webhook client
#[derive(Debug, Clone, Default)]
pub struct HttpWebhookClient {
    client: reqwest::Client,
}

impl HttpWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn post_lead(&self, url: &str, payload: &LeadPayload) -> Result<(), SubmitError> {
        let response = self.client.post(url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        tracing::debug!("Webhook accepted lead with status {status}");
        Ok(())
    }
}
