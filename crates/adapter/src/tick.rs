//! Countdown drivers.
//!
//! The session never reads a clock. A [`TickSource`] is polled by the host loop
//! and reports how many whole countdown seconds are due.

use std::time::{Duration, Instant};

use crate::types::TICK_MS;

/// Something that decides when countdown ticks happen.
pub trait TickSource {
    /// Number of ticks due since the previous poll.
    fn poll(&mut self) -> u32;

    /// Restart the cadence (a new session just began).
    fn reset(&mut self);

    /// Time until the next tick is due, if the source knows it.
    ///
    /// Host loops use this as their input wait timeout.
    fn until_next(&self) -> Option<Duration> {
        None
    }
}

/// Wall-clock ticker (1 Hz by default).
///
/// Missed seconds are caught up on the next poll rather than dropped, so a
/// stalled host loop cannot stretch the session.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next_due: Instant,
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS))
    }
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_due: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll against an explicit instant.
    pub fn poll_at(&mut self, now: Instant) -> u32 {
        let mut due = 0u32;
        while now >= self.next_due {
            due = due.saturating_add(1);
            self.next_due += self.interval;
        }
        due
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }
}

impl TickSource for IntervalTicker {
    fn poll(&mut self) -> u32 {
        self.poll_at(Instant::now())
    }

    fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn until_next(&self) -> Option<Duration> {
        Some(self.next_due.saturating_duration_since(Instant::now()))
    }
}

/// Ticks pushed by hand (tests, scripted runs).
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    pending: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, n: u32) {
        self.pending = self.pending.saturating_add(n);
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}

impl TickSource for ManualTicks {
    fn poll(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    // Pushed ticks are explicit requests; a restart does not discard them.
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_ticker_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut t = IntervalTicker::starting_at(Duration::from_secs(1), t0);
        assert_eq!(t.poll_at(t0), 0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(999)), 0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1000)), 1);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(2000)), 1);
    }

    #[test]
    fn interval_ticker_catches_up() {
        let t0 = Instant::now();
        let mut t = IntervalTicker::starting_at(Duration::from_secs(1), t0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(3500)), 3);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(4000)), 1);
    }

    #[test]
    fn interval_ticker_reset_restarts_cadence() {
        let t0 = Instant::now();
        let mut t = IntervalTicker::starting_at(Duration::from_secs(1), t0);
        t.reset_at(t0 + Duration::from_millis(900));
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1000)), 0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1900)), 1);
    }

    #[test]
    fn manual_ticks_drain_on_poll() {
        let mut t = ManualTicks::new();
        t.push(2);
        t.push(1);
        assert_eq!(t.pending(), 3);
        assert_eq!(t.poll(), 3);
        assert_eq!(t.poll(), 0);
        assert_eq!(t.until_next(), None);
    }
}
