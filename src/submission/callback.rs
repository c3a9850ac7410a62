//! Host callbacks invoked with the collected form at submit time

use crate::state::FormState;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Receives the full form synchronously when the lead submits.
///
/// Returning an error aborts the webhook call and keeps the wizard on the
/// contact step.
pub trait LeadCallback: Send + Sync {
    fn on_submit(&self, form: &FormState) -> Result<()>;
}

impl<F> LeadCallback for F
where
    F: Fn(&FormState) -> Result<()> + Send + Sync,
{
    fn on_submit(&self, form: &FormState) -> Result<()> {
        self(form)
    }
}

/// Appends each submitted lead as one JSON line to a file
#[derive(Debug, Clone)]
pub struct CaptureFile {
    path: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CapturedLead<'a> {
    id: Uuid,
    captured_at: DateTime<Utc>,
    lead: &'a FormState,
}

impl CaptureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeadCallback for CaptureFile {
    fn on_submit(&self, form: &FormState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = CapturedLead {
            id: Uuid::new_v4(),
            captured_at: Utc::now(),
            lead: form,
        };
        let line = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        tracing::info!("Captured lead {} to {}", record.id, self.path().display());
        Ok(())
    }
}
