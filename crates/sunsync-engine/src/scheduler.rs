//! Trailing-edge save debounce.
//!
//! Coalesces keystroke-level edits into one save evaluation: every change
//! pushes the deadline out by the full window, and the evaluation fires only
//! once the window has elapsed with no further change. The store consumes
//! the deadline whether the evaluation ends in a write or a skip, so one
//! burst of edits costs exactly one evaluation.

use std::time::{Duration, Instant};

/// Default debounce window; wide enough to swallow typing, short enough
/// that the UI still feels snappy.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(600);

/// A cancellable trailing-edge debounce over wall-clock instants.
#[derive(Debug, Clone)]
pub struct SaveDebounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for SaveDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SaveDebounce {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a change; restarts the window.
    pub fn mark_changed(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Whether an evaluation is scheduled (fired or not).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the window has elapsed and the evaluation should run.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Time remaining until the deadline, if one is armed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the scheduled evaluation.
    pub fn consume(&mut self) {
        self.deadline = None;
    }

    /// Drop any scheduled evaluation without running it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
