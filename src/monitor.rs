//! Diagnostics monitor: actions per second.
//!
//! Ticks are spaced on a nominal 1-second grid. Each next due time is the
//! previous nominal due time plus one period, never "now" plus one period,
//! so late firings do not push the grid back.

use log::{info, trace};
use std::time::{Duration, Instant};

/// Spacing of monitor ticks.
pub const MONITOR_PERIOD: Duration = Duration::from_secs(1);

/// Action counter sampled once per period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Monitor {
    action_count: u64,
    /// Nominal due time of the next tick; `None` until started.
    next_due: Option<Instant>,
    last_sample: Option<u64>,
    samples: u64,
}

impl Monitor {
    /// An idle monitor with a zero count.
    pub const fn new() -> Self {
        Self {
            action_count: 0,
            next_due: None,
            last_sample: None,
            samples: 0,
        }
    }

    /// Count one user-visible state change.
    pub fn record_action(&mut self) {
        self.action_count += 1;
    }

    /// Actions since the last sample.
    #[inline]
    pub const fn action_count(&self) -> u64 {
        self.action_count
    }

    /// The most recent sample, if a tick has fired.
    #[inline]
    pub const fn last_sample(&self) -> Option<u64> {
        self.last_sample
    }

    /// Number of ticks fired.
    #[inline]
    pub const fn samples(&self) -> u64 {
        self.samples
    }

    /// Nominal due time of the next tick.
    #[inline]
    pub const fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Begin sampling. Returns the first due time, one period after `now`.
    pub fn start(&mut self, now: Instant) -> Instant {
        let first = now + MONITOR_PERIOD;
        self.next_due = Some(first);
        first
    }

    /// Sample and reset the counter. Returns the next nominal due time.
    ///
    /// `fired_at` only matters for a monitor that was never started, which
    /// then anchors its grid there.
    pub fn tick(&mut self, fired_at: Instant) -> Instant {
        let nominal = self.next_due.unwrap_or(fired_at);
        trace!(
            "Monitor tick {:?} late",
            fired_at.saturating_duration_since(nominal)
        );
        info!("Action(s) {} per sec.", self.action_count);

        self.last_sample = Some(self.action_count);
        self.samples += 1;
        self.action_count = 0;

        let next = nominal + MONITOR_PERIOD;
        self.next_due = Some(next);
        next
    }
}
