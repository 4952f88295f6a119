//! Reactor: a single-threaded store of time-stamped one-shot callbacks.
//!
//! The reactor has no notion of recurring timers. A client that wants to run
//! periodically re-arms itself from inside its own callback.
//!
//! # Firing rules
//!
//! - A callback fires on the first [`Reactor::process`] call whose start time
//!   is at or after its due time, and never again.
//! - Within one pass, due callbacks fire in due-time order; ties fire in the
//!   order they were scheduled.
//! - A callback scheduled while a pass is running is never fired by that
//!   pass, even if it is already due.
//!
//! Callbacks receive the context passed to `process` and the reactor itself,
//! so they can mutate application state and schedule follow-ups.
//!
//! ```text
//!   process(ctx)
//!     │ now = clock.now()
//!     ├─ swap-remove every pending entry with due_at <= now
//!     ├─ sort them by (due_at, seq)
//!     └─ call each: action(ctx, reactor)  ──▶ may schedule_* again
//! ```

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::time::{Duration, Instant};

/// A one-shot callback.
pub type Action<C> = Box<dyn FnOnce(&mut C, &mut Reactor<C>)>;

/// A pending callback.
struct Scheduled<C> {
    /// When the callback becomes eligible to fire.
    due_at: Instant,
    /// Insertion sequence, breaks ties between equal due times.
    seq: u64,
    action: Action<C>,
}

/// Cooperative timer reactor over an application context `C`.
pub struct Reactor<C> {
    /// Pending callbacks, unordered. Removal is `swap_remove`.
    pending: Vec<Scheduled<C>>,
    /// Next insertion sequence number.
    next_seq: u64,
    clock: Box<dyn Clock>,
}

impl<C> Reactor<C> {
    /// Create an empty reactor reading time from `clock`.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
            clock: Box::new(clock),
        }
    }

    /// The reactor's current time.
    #[inline]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Call `action` once `due_at` has passed.
    pub fn schedule_at<F>(&mut self, due_at: Instant, action: F)
    where
        F: FnOnce(&mut C, &mut Self) + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_at,
            seq,
            action: Box::new(action),
        });
    }

    /// Call `action` once `delay` has elapsed from now.
    pub fn schedule_after<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce(&mut C, &mut Self) + 'static,
    {
        let due_at = self.now() + delay;
        self.schedule_at(due_at, action);
    }

    /// Fire every callback that was due when this call began.
    ///
    /// Returns the number of callbacks fired. A panicking callback unwinds
    /// through this call; the callbacks after it in the same pass are dropped
    /// without firing.
    pub fn process(&mut self, ctx: &mut C) -> usize {
        let now = self.now();

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_at <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by_key(|entry| (entry.due_at, entry.seq));

        let fired = due.len();
        for entry in due {
            (entry.action)(ctx, self);
        }
        fired
    }

    /// The earliest pending due time, if any.
    ///
    /// Useful for sizing a blocking wait instead of polling.
    pub fn next_due_at(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.due_at).min()
    }

    /// Number of pending callbacks.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<C> std::fmt::Debug for Reactor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("pending", &self.pending.len())
            .field("next_due_at", &self.next_due_at())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Log = Vec<&'static str>;

    fn reactor() -> (Reactor<Log>, ManualClock) {
        let clock = ManualClock::new();
        (Reactor::new(clock.clone()), clock)
    }

    #[test]
    fn test_process_empty_is_noop() {
        let (mut reactor, _clock) = reactor();
        let mut log = Log::new();

        assert_eq!(reactor.process(&mut log), 0);
        assert!(reactor.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_never_fires_early() {
        let (mut reactor, clock) = reactor();
        let mut log = Log::new();

        reactor.schedule_after(Duration::from_millis(100), |log: &mut Log, _| log.push("a"));

        clock.advance(Duration::from_millis(99));
        assert_eq!(reactor.process(&mut log), 0);
        assert!(log.is_empty());
        assert_eq!(reactor.len(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(reactor.process(&mut log), 1);
        assert_eq!(log, vec!["a"]);
    }

    #[test]
    fn test_fires_at_most_once() {
        let (mut reactor, clock) = reactor();
        let mut log = Log::new();

        reactor.schedule_after(Duration::from_millis(10), |log: &mut Log, _| log.push("once"));
        clock.advance(Duration::from_millis(50));

        reactor.process(&mut log);
        reactor.process(&mut log);
        clock.advance(Duration::from_secs(5));
        reactor.process(&mut log);

        assert_eq!(log, vec!["once"]);
        assert!(reactor.is_empty());
    }

    #[test]
    fn test_not_due_callbacks_remain() {
        let (mut reactor, clock) = reactor();
        let mut log = Log::new();

        reactor.schedule_after(Duration::from_millis(10), |log: &mut Log, _| log.push("soon"));
        reactor.schedule_after(Duration::from_secs(10), |log: &mut Log, _| log.push("later"));

        clock.advance(Duration::from_millis(10));
        reactor.process(&mut log);

        assert_eq!(log, vec!["soon"]);
        assert_eq!(reactor.len(), 1);
    }

    #[test]
    fn test_due_time_order_then_insertion_order() {
        let (mut reactor, clock) = reactor();
        let mut log = Log::new();
        let base = clock.now();

        reactor.schedule_at(base + Duration::from_millis(30), |log: &mut Log, _| log.push("c"));
        reactor.schedule_at(base + Duration::from_millis(10), |log: &mut Log, _| log.push("a1"));
        reactor.schedule_at(base + Duration::from_millis(20), |log: &mut Log, _| log.push("b"));
        reactor.schedule_at(base + Duration::from_millis(10), |log: &mut Log, _| log.push("a2"));

        clock.advance(Duration::from_millis(30));
        assert_eq!(reactor.process(&mut log), 4);
        assert_eq!(log, vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn test_self_reschedule_deferred_to_next_pass() {
        fn again(log: &mut Log, reactor: &mut Reactor<Log>) {
            log.push("tick");
            reactor.schedule_after(Duration::ZERO, again);
        }

        let (mut reactor, clock) = reactor();
        let mut log = Log::new();
        reactor.schedule_after(Duration::ZERO, again);

        assert_eq!(reactor.process(&mut log), 1);
        assert_eq!(log, vec!["tick"]);
        assert_eq!(reactor.len(), 1);

        clock.advance(Duration::from_millis(1));
        assert_eq!(reactor.process(&mut log), 1);
        assert_eq!(log, vec!["tick", "tick"]);
    }

    #[test]
    fn test_next_due_at() {
        let (mut reactor, clock) = reactor();
        assert_eq!(reactor.next_due_at(), None);

        let base = clock.now();
        reactor.schedule_at(base + Duration::from_secs(3), |_: &mut Log, _| {});
        reactor.schedule_at(base + Duration::from_secs(1), |_: &mut Log, _| {});
        reactor.schedule_at(base + Duration::from_secs(2), |_: &mut Log, _| {});

        assert_eq!(reactor.next_due_at(), Some(base + Duration::from_secs(1)));
    }

    #[test]
    fn test_callbacks_mutate_context_in_order() {
        let mut counter = 0u32;
        let mut reactor: Reactor<u32> = Reactor::new(ManualClock::new());

        reactor.schedule_after(Duration::ZERO, |n: &mut u32, _| *n += 1);
        reactor.schedule_after(Duration::ZERO, |n: &mut u32, _| *n *= 10);
        reactor.process(&mut counter);
        assert_eq!(counter, 10);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_callback_panic_propagates() {
        let (mut reactor, _clock) = reactor();
        reactor.schedule_after(Duration::ZERO, |_: &mut Log, _| panic!("boom"));
        reactor.process(&mut Log::new());
    }
}
