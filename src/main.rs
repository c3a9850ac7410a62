//! Intake Funnel - terminal lead-intake wizard
//!
//! Walks a prospective lead through eight qualifying steps and submits the
//! answers to a webhook and/or a local capture file.

mod app;
mod config;
mod mount;
mod state;
mod submission;
mod ui;

use anyhow::Result;
use config::FunnelConfig;
use mount::{mount, MountOptions};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = FunnelConfig::load()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let log_guard = init_logging(&config);

    tracing::info!(
        webhook = config.webhook_url.is_some(),
        capture = config.capture_path.is_some(),
        "Starting intake funnel"
    );
    if config.webhook_url.is_none() && config.capture_path.is_none() {
        tracing::warn!("No webhook or capture file configured; leads will not be recorded");
    }

    let result = run(&config).await;
    shutdown(result, log_guard)
}

async fn run(config: &FunnelConfig) -> Result<()> {
    let mut handle = mount(MountOptions::discover(config))?;
    let result = handle.run().await;
    handle.unmount()?;
    result
}

/// Record the exit status, then flush the log before handing it back to `main`
fn shutdown(result: Result<()>, log_guard: WorkerGuard) -> Result<()> {
    match &result {
        Ok(()) => tracing::info!("Intake funnel exited"),
        Err(err) => tracing::error!("Intake funnel exited with error: {err:?}"),
    }
    drop(log_guard);
    result
}

/// Non-blocking writer into `intake-funnel.log` under `log_dir`
fn file_writer(log_dir: &Path) -> (NonBlocking, WorkerGuard) {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("intake-funnel.log")
        .build(log_dir);

    match appender {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(err) => {
            eprintln!("Logging disabled, cannot write to {}: {err}", log_dir.display());
            tracing_appender::non_blocking(std::io::sink())
        }
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(config: &FunnelConfig) -> WorkerGuard {
    let (writer, guard) = file_writer(&config.log_dir());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_funnel=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    guard
}
