//! Resize reporting — fit the overlay window to its rendered content.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Settle delay before measuring: coalesces a record change followed
/// immediately by a transliteration resolving into a single resize.
const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Extra width added to the measured content box, matching the overlay's
/// default font size.
const WIDTH_PADDING: f32 = 14.0;

// ---------------------------------------------------------------------------
// WindowHost
// ---------------------------------------------------------------------------

/// Errors returned by the window collaborator.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The host window is gone or not answering.
    #[error("window host unreachable: {0}")]
    Unreachable(String),
}

/// Async trait over the overlay window's sizing surface.
#[async_trait]
pub trait WindowHost: Send + Sync {
    async fn request_resize(&self, width: f32, height: f32) -> Result<(), WindowError>;
}

// ---------------------------------------------------------------------------
// ResizeReporter
// ---------------------------------------------------------------------------

/// Debounced window-resize requests.
///
/// Each [`report`](Self::report) supersedes any pending one; the resize is
/// issued only after the content box has been stable for the settle delay.
/// Width is padded, height is not.  A failed request is logged and dropped —
/// the next settle cycle retries naturally.
pub struct ResizeReporter {
    window: Arc<dyn WindowHost>,
    settle: Duration,
    pending: Option<JoinHandle<()>>,
}

impl ResizeReporter {
    pub fn new(window: Arc<dyn WindowHost>) -> Self {
        Self {
            window,
            settle: SETTLE_DELAY,
            pending: None,
        }
    }

    /// Override the settle delay (tests).
    #[cfg(test)]
    pub(crate) fn with_settle(window: Arc<dyn WindowHost>, settle: Duration) -> Self {
        Self {
            window,
            settle,
            pending: None,
        }
    }

    /// Schedule a resize to fit the measured content box.
    pub fn report(&mut self, width: f32, height: f32) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let window = Arc::clone(&self.window);
        let settle = self.settle;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            if let Err(e) = window.request_resize(width + WIDTH_PADDING, height).await {
                log::warn!("overlay resize request failed: {e}");
            }
        }));
    }
}

impl Drop for ResizeReporter {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
