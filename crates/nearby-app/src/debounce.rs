//! Quiet-period debouncing for free-text search input.
//!
//! Every keystroke schedules a timer and supersedes the previous one. When a
//! timer survives its quiet period it reports its generation on a channel;
//! the owner then claims the pending text with [`SearchDebouncer::take_if_current`],
//! which ignores generations that were superseded in the meantime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct SearchDebouncer {
    quiet: Duration,
    generation: u64,
    pending: Option<String>,
    timer: Option<JoinHandle<()>>,
    fired: mpsc::UnboundedSender<u64>,
}

impl std::fmt::Debug for SearchDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchDebouncer")
            .field("quiet", &self.quiet)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl SearchDebouncer {
    /// Returns the debouncer and the receiver on which elapsed generations
    /// are reported.
    #[must_use]
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            generation: 0,
            pending: None,
            timer: None,
            fired,
        };
        (debouncer, rx)
    }

    /// Record `text` as the latest input and restart the quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.pending = Some(text.into());
        if let Some(previous) = self.timer.take() {
            previous.abort();
        }

        let generation = self.generation;
        let quiet = self.quiet;
        let fired = self.fired.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // The receiver is gone only when the owner has shut down.
            let _ = fired.send(generation);
        }));
        generation
    }

    /// Claim the pending text if `generation` is the most recent schedule.
    pub fn take_if_current(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        self.timer = None;
        self.pending.take()
    }

    /// Drop any pending input without applying it.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
