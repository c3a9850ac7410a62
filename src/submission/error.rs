//! Submission error types

use thiserror::Error;

/// Failure delivering a lead to the webhook endpoint
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(reqwest::StatusCode),
}
