//! Lead submission: payload construction, host callback and webhook delivery

mod callback;
mod dispatcher;
mod error;
mod payload;
mod webhook;

pub use callback::{CaptureFile, LeadCallback};
pub use dispatcher::{SubmissionDispatcher, SubmissionOutcome};
pub use error::SubmitError;
pub use payload::{CustomField, LeadPayload};
pub use webhook::{HttpWebhookClient, WebhookClient};

#[cfg(test)]
pub use webhook::MockWebhookClient;
