//! Session: the reactor context shared by playback, monitor and dispatch.
//!
//! Both periodic clients re-arm themselves from their own callback. Their
//! re-arm policies differ and must stay different:
//!
//! - pacing re-arms `word_delay` after *now*, so a rate change lands on the
//!   next tick boundary;
//! - the monitor re-arms one period after its previous *nominal* due time, so
//!   late firings do not drift.

use crate::config::ReaderConfig;
use crate::monitor::Monitor;
use crate::playback::{Playback, WARM_UP};
use crate::reactor::Reactor;

/// Mutable reader state driven by the reactor and the input dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Reading cursor and pacing.
    pub playback: Playback,
    /// Actions-per-second diagnostics.
    pub monitor: Monitor,
    running: bool,
}

impl Session {
    /// A running session at the first word, paused.
    pub fn new(config: &ReaderConfig) -> Self {
        Self {
            playback: Playback::new(config.words_per_minute),
            monitor: Monitor::new(),
            running: true,
        }
    }

    /// Whether the main loop should keep going.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the main loop to stop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Arm the first pacing tick after the warm-up delay and the first
    /// monitor tick one period from now.
    pub fn start(&mut self, reactor: &mut Reactor<Self>) {
        reactor.schedule_after(WARM_UP, pacing_tick);
        let first = self.monitor.start(reactor.now());
        reactor.schedule_at(first, monitor_tick);
    }
}

fn pacing_tick(session: &mut Session, reactor: &mut Reactor<Session>) {
    let Session {
        playback, monitor, ..
    } = session;
    let delay = playback.tick(monitor);
    reactor.schedule_after(delay, pacing_tick);
}

fn monitor_tick(session: &mut Session, reactor: &mut Reactor<Session>) {
    let next = session.monitor.tick(reactor.now());
    reactor.schedule_at(next, monitor_tick);
}
