use std::collections::VecDeque;

use crate::constants::RATE_WINDOW_SECS;

/// Trailing per-minute rate over recent crossings
///
/// Keeps the timestamps of accepted crossings and reports how many fell in
/// the last [`RATE_WINDOW_SECS`] at query time. Until a session is that old
/// the observed count is extrapolated from the elapsed time instead, so a
/// young session reports a meaningful pace rather than ramping up from
/// zero over the first minute.
///
/// The window trails the query clock, not the session clock: events slide
/// out of the rate as they age even though the cumulative count keeps them.
pub struct RateWindow {
    events: VecDeque<f64>,
    session_start_t: f64,
}

impl RateWindow {
    pub fn new(start_t: f64) -> Self {
        Self {
            events: VecDeque::new(),
            session_start_t: start_t,
        }
    }

    /// Record one accepted crossing
    ///
    /// Timestamps are expected in arrival order; pruning relies on the
    /// front of the queue being the oldest entry.
    pub fn record_event(&mut self, t: f64) {
        self.events.push_back(t);
    }

    /// Per-minute rate as of `now`
    ///
    /// Entries at or beyond the window edge are dropped first, so the
    /// window is the half-open interval `(now - 60, now]`. With nothing
    /// recorded, or with a non-positive session age, the rate is zero.
    pub fn rate(&mut self, now: f64) -> f64 {
        let cutoff = now - RATE_WINDOW_SECS;
        while self.events.front().is_some_and(|&t| t <= cutoff) {
            self.events.pop_front();
        }

        if self.events.is_empty() {
            return 0.0;
        }

        let elapsed = self.elapsed(now);
        if elapsed <= 0.0 {
            0.0
        } else if elapsed < RATE_WINDOW_SECS {
            self.events.len() as f64 / elapsed * 60.0
        } else {
            self.events.len() as f64
        }
    }

    /// Seconds since the session started
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.session_start_t
    }

    /// Events currently held, including any not yet pruned
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget all events and restart the session clock at `now`
    pub fn restart(&mut self, now: f64) {
        self.events.clear();
        self.session_start_t = now;
    }
}
