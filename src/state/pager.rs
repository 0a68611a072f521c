//! Incremental loading of the result grid. Only a prefix of the visible set
//! is rendered; scrolling near the end requests another increment after a
//! short simulated latency, and any filter change snaps the window back to
//! its initial size.

use std::time::{Duration, Instant};

/// Number of cards rendered before any incremental load.
pub const INITIAL_WINDOW: usize = 20;
/// How many cards each completed load adds.
pub const WINDOW_INCREMENT: usize = 10;
/// Simulated latency between a load request and the window growing.
pub const LOAD_LATENCY: Duration = Duration::from_millis(500);

/// Window state: the current prefix length plus an optional pending-load
/// deadline. `Idle -> LoadingMore` on `request_more`, back to `Idle` when
/// `tick` passes the deadline.
#[derive(Debug, Clone)]
pub struct Pager {
    visible_count: usize,
    pending: Option<Instant>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            visible_count: INITIAL_WINDOW,
            pending: None,
        }
    }

    /// How many visible records the grid may render right now.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the visible set still extends past the window.
    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible_count
    }

    /// Arm a load if one is not already pending and records remain beyond
    /// the window. Returns whether a load was actually started.
    pub fn request_more(&mut self, total: usize, now: Instant) -> bool {
        if self.pending.is_some() || !self.has_more(total) {
            return false;
        }
        self.pending = Some(now + LOAD_LATENCY);
        true
    }

    /// Resolve a pending load whose latency has elapsed. Returns whether the
    /// window grew.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.visible_count += WINDOW_INCREMENT;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Snap back to the initial window and drop any pending load. Called on
    /// every filter-input change so a new result set never inherits an
    /// unrelated scroll position's page size.
    pub fn reset(&mut self) {
        self.visible_count = INITIAL_WINDOW;
        self.pending = None;
    }
}
