//! Scripted input for driving the reader without a terminal.

use super::messages::InputEvent;
use super::InputSource;
use crate::reactor::ManualClock;
use std::collections::VecDeque;
use std::time::Duration;

/// Replays a fixed queue of events.
///
/// When the queue is empty a wait returns `None`. With a clock attached it
/// also advances that clock by the full timeout, the way a real blocking
/// wait would let time pass.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    clock: Option<ManualClock>,
    waits: Vec<Duration>,
}

impl ScriptedInput {
    /// Replay `events` in order.
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            clock: None,
            waits: Vec::new(),
        }
    }

    /// Let empty waits move `clock` forward.
    #[must_use]
    pub fn with_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Queue another event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Timeouts of every wait so far, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl InputSource for ScriptedInput {
    fn wait_event(&mut self, timeout: Duration) -> Option<InputEvent> {
        self.waits.push(timeout);
        let event = self.events.pop_front();
        if event.is_none() {
            if let Some(clock) = &self.clock {
                clock.advance(timeout);
            }
        }
        event
    }
}
