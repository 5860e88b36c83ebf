// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Coalesce / display timer bookkeeping.
//!
//! The core is single-threaded and host-driven, so the two timers are plain
//! deadline state: `feed` re-arms the short coalesce timer, and while input
//! keeps arriving the steady display timer caps how long processing can be
//! deferred. The host asks for the next deadline, sleeps its own way, and
//! calls back in; firing tells it whether to run `process_incoming`.

use std::time::{Duration, Instant};

/// Quiet period after a feed before processing (re-armed on every feed).
pub const COALESCE_INTERVAL: Duration = Duration::from_millis(25);

/// Hard cap between processing passes while feeds keep arriving.
pub const DISPLAY_INTERVAL: Duration = Duration::from_millis(40);

#[derive(Debug, Default)]
pub struct UpdateTimers {
    coalesce_deadline: Option<Instant>,
    display_deadline: Option<Instant>,
}

impl UpdateTimers {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A feed arrived: re-arm the coalesce timer, and start the display
    /// timer if it is not already running.
    pub fn arm(&mut self, now: Instant) {
        self.coalesce_deadline = Some(now + COALESCE_INTERVAL);
        if self.display_deadline.is_none() {
            self.display_deadline = Some(now + DISPLAY_INTERVAL);
        }
    }

    /// The earlier of the two pending deadlines.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.coalesce_deadline, self.display_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Check the deadlines at `now`. When either has expired both are
    /// cleared and the caller must process pending input (re-arming happens
    /// on the next feed, or immediately by the caller when input remains).
    #[must_use]
    pub fn fire(&mut self, now: Instant) -> bool {
        let due = self
            .next_deadline()
            .is_some_and(|deadline| deadline <= now);
        if due {
            self.coalesce_deadline = None;
            self.display_deadline = None;
        }
        due
    }

    /// Keep the display timer running because input is still pending;
    /// called after a processing pass that could not finish.
    pub fn rearm_display(&mut self, now: Instant) {
        self.display_deadline = Some(now + DISPLAY_INTERVAL);
    }

    /// Idempotent cancellation of both timers.
    pub fn cancel(&mut self) {
        self.coalesce_deadline = None;
        self.display_deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool { self.next_deadline().is_some() }
}
