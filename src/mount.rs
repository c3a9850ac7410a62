//! Mounting the funnel onto a terminal and tearing it down again

use crate::app::App;
use crate::config::FunnelConfig;
use crate::submission::{CaptureFile, LeadCallback, SubmissionDispatcher};
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Set while a [`MountHandle`] is alive
static MOUNTED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Error)]
pub enum MountError {
    #[error("the intake funnel is already mounted")]
    AlreadyMounted,

    #[error("terminal setup failed: {0}")]
    Terminal(#[from] io::Error),
}

/// What the host supplies at mount time
#[derive(Clone, Default)]
pub struct MountOptions {
    /// Webhook notified with each lead
    pub webhook_url: Option<String>,
    /// Callback invoked with the full form on submit
    pub on_submit: Option<Arc<dyn LeadCallback>>,
}

impl MountOptions {
    /// Options discovered from configuration and environment
    pub fn discover(config: &FunnelConfig) -> Self {
        Self {
            webhook_url: config.webhook_url.clone(),
            on_submit: config
                .capture_path
                .clone()
                .map(|path| Arc::new(CaptureFile::new(path)) as Arc<dyn LeadCallback>),
        }
    }

    fn into_dispatcher(self) -> SubmissionDispatcher {
        SubmissionDispatcher::new(self.webhook_url, self.on_submit)
    }
}

/// Releases the once-per-process mount flag on drop
struct MountGuard;

impl MountGuard {
    fn acquire() -> Result<Self, MountError> {
        MOUNTED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MountError::AlreadyMounted)?;
        Ok(Self)
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        MOUNTED.store(false, Ordering::SeqCst);
    }
}

/// A mounted funnel. Dropping it is the same as [`MountHandle::unmount`].
pub struct MountHandle<B: Backend> {
    terminal: Terminal<B>,
    app: App,
    /// Whether raw mode and the alternate screen must be restored
    owns_tty: bool,
    released: bool,
    _guard: MountGuard,
}

/// Take over the controlling terminal and mount the funnel on it
pub fn mount(options: MountOptions) -> Result<MountHandle<CrosstermBackend<Stdout>>, MountError> {
    let guard = MountGuard::acquire()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let dispatcher = options.into_dispatcher();
    tracing::info!(
        webhook = dispatcher.webhook_url().unwrap_or("none"),
        "Intake funnel mounted"
    );
    Ok(MountHandle {
        terminal,
        app: App::new(dispatcher),
        owns_tty: true,
        released: false,
        _guard: guard,
    })
}

/// Mount onto an arbitrary backend without touching the terminal mode
#[cfg(test)]
pub fn mount_with_backend<B: Backend>(
    options: MountOptions,
    backend: B,
) -> Result<MountHandle<B>, MountError> {
    let guard = MountGuard::acquire()?;
    let terminal = Terminal::new(backend)?;
    Ok(MountHandle {
        terminal,
        app: App::new(options.into_dispatcher()),
        owns_tty: false,
        released: false,
        _guard: guard,
    })
}

impl<B: Backend> MountHandle<B> {
    /// Draw one frame
    pub fn draw(&mut self) -> Result<()> {
        self.terminal.draw(|frame| ui::draw(frame, &self.app))?;
        Ok(())
    }

    /// Run the event loop until the lead closes the funnel
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let now = Instant::now();
            self.app.tick(now);
            self.draw()?;

            // Faster polling while a timer or the submission is pending
            let poll_duration = if self.app.is_animating(now) || self.app.wizard.is_submitting() {
                Duration::from_millis(16)
            } else {
                Duration::from_millis(100)
            };

            if event::poll(poll_duration)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            tracing::info!("Funnel closed with Ctrl+C");
                            return Ok(());
                        }
                        self.app.handle_key(key);
                    }
                }
            }

            if self.app.should_quit() {
                return Ok(());
            }

            // Let the submission task make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
    }

    /// Tear the UI down and cancel any scheduled auto-advance
    pub fn unmount(mut self) -> Result<(), MountError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), MountError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.app.teardown();

        if self.owns_tty {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal.show_cursor()?;
        }

        tracing::info!("Intake funnel unmounted");
        Ok(())
    }
}

impl<B: Backend> Drop for MountHandle<B> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!("Failed to restore terminal: {err}");
        }
    }
}
