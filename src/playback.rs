//! Playback controller: the reading cursor and its pacing.
//!
//! States are `{Playing, Paused}` crossed with a monotone `position`. Pacing
//! ticks keep firing while paused; they just do not advance. The reactor
//! wiring lives in [`session`](crate::session).

use crate::config::WordsPerMinute;
use crate::monitor::Monitor;
use log::trace;
use std::time::Duration;

/// Delay between activation and the first pacing tick.
pub const WARM_UP: Duration = Duration::from_secs(1);

/// Reading cursor, pause state, rate and repaint tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    /// Zero-based index into the token sequence.
    position: usize,
    paused: bool,
    rate: WordsPerMinute,
    /// Displayed content is stale.
    dirty: bool,
}

impl Playback {
    /// A paused controller at the first word, with the first frame pending.
    pub const fn new(rate: WordsPerMinute) -> Self {
        Self {
            position: 0,
            paused: true,
            rate,
            dirty: true,
        }
    }

    /// Current token index.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether advancing is suspended.
    #[inline]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current reading rate.
    #[inline]
    pub const fn rate(&self) -> WordsPerMinute {
        self.rate
    }

    /// Whether a repaint is pending.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Delay until the next pacing tick at the current rate.
    #[inline]
    pub const fn word_delay(&self) -> Duration {
        self.rate.word_delay()
    }

    /// Change the rate. Takes effect at the next tick boundary.
    pub fn set_words_per_minute(&mut self, rate: WordsPerMinute) {
        self.rate = rate;
    }

    /// One pacing step.
    ///
    /// The delay is computed before advancing, from the rate in force now.
    /// When playing, moves one word forward, counts an action and marks the
    /// display stale. Returns the delay until the next tick either way.
    pub fn tick(&mut self, monitor: &mut Monitor) -> Duration {
        let delay = self.word_delay();
        trace!("Word {} duration on screen {:?}", self.position, delay);
        if !self.paused {
            self.position += 1;
            monitor.record_action();
            self.dirty = true;
        }
        delay
    }

    /// Flip between playing and paused.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Resume advancing.
    pub fn play(&mut self) {
        self.paused = false;
    }

    /// Stop advancing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Seek one word back, stopping at the first word.
    pub fn step_back(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.dirty = true;
    }

    /// Seek one word forward. Past the end the token source shows its
    /// end-of-text marker.
    pub fn step_forward(&mut self) {
        self.position = self.position.saturating_add(1);
        self.dirty = true;
    }

    /// Mark the displayed content stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Record that a repaint happened.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(WordsPerMinute::DEFAULT)
    }
}
