//! App: the single-threaded control loop.
//!
//! Each iteration runs four steps in order:
//!
//! ```text
//! reactor.process ─▶ input.wait_event(timeout) ─▶ dispatch ─▶ repaint if dirty
//! ```
//!
//! The wait is zero while a repaint is pending, otherwise the configured
//! poll timeout capped at the next reactor due time.

use crate::actor::{InputEvent, InputSource};
use crate::buffer::Rgb;
use crate::config::{ReaderConfig, WordsPerMinute};
use crate::dispatch::{dispatch, Dispatch};
use crate::error::Result;
use crate::font::{Font, FontCache};
use crate::reactor::{Clock, Reactor};
use crate::session::Session;
use crate::terminal::Display;
use crate::text::Tokens;
use log::{debug, info, trace, warn};
use std::time::Duration;

/// The reader: session state, its reactor and the external collaborators.
pub struct App<D: Display, I: InputSource> {
    config: ReaderConfig,
    reactor: Reactor<Session>,
    session: Session,
    tokens: Tokens,
    fonts: FontCache,
    font: Font,
    display: D,
    input: I,
    failed_repaints: u64,
    frames: u64,
}

impl<D: Display, I: InputSource> App<D, I> {
    /// Assemble a reader. Resolves the configured font.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Font`](crate::Error::Font) if the font cannot be
    /// resolved.
    pub fn new(
        config: ReaderConfig,
        tokens: Tokens,
        clock: impl Clock + 'static,
        display: D,
        input: I,
    ) -> Result<Self> {
        let mut fonts = FontCache::new();
        let font = fonts.load(&config.font_name, config.font_size)?;
        Ok(Self {
            reactor: Reactor::new(clock),
            session: Session::new(&config),
            config,
            tokens,
            fonts,
            font,
            display,
            input,
            failed_repaints: 0,
            frames: 0,
        })
    }

    /// Arm the pacing and monitor timers.
    pub fn start(&mut self) {
        self.session.start(&mut self.reactor);
        debug!("{} words, timers armed", self.tokens.len());
    }

    /// One pass of the control loop.
    pub fn iterate(&mut self) {
        let fired = self.reactor.process(&mut self.session);
        if fired > 0 {
            trace!("fired {fired} timer(s)");
        }

        let timeout = self.wait_timeout();
        if let Some(event) = self.input.wait_event(timeout) {
            self.handle(event);
        }

        if self.session.is_running() && self.session.playback.is_dirty() {
            if let Err(e) = self.repaint() {
                warn!("repaint failed: {e}");
                self.failed_repaints += 1;
            }
            self.session.playback.clear_dirty();
        }
    }

    fn wait_timeout(&self) -> Duration {
        if self.session.playback.is_dirty() {
            return Duration::ZERO;
        }
        self.reactor
            .next_due_at()
            .map_or(self.config.poll_timeout, |due| {
                due.saturating_duration_since(self.reactor.now())
                    .min(self.config.poll_timeout)
            })
    }

    fn handle(&mut self, event: InputEvent) {
        // Resizes arrive as `Other`.
        if event == InputEvent::Other && self.display.refresh_size() {
            self.session.playback.mark_dirty();
        }
        match dispatch(event, &mut self.session) {
            Dispatch::Handled => trace!("handled {event:?}"),
            Dispatch::Terminate => info!("stopping on {event:?}"),
            Dispatch::Ignored => {}
        }
    }

    /// Paint the word at the current position.
    ///
    /// # Errors
    ///
    /// Returns the display's error; the frame is then not presented.
    pub fn repaint(&mut self) -> Result<()> {
        let word = self.tokens.get(self.session.playback.position());
        debug!("Word = {word}");
        self.display.clear(Rgb::BLACK);
        self.display.draw_centered(&self.font, word.as_str())?;
        self.display.present()?;
        self.frames += 1;
        Ok(())
    }

    /// Start and iterate until a quit request.
    pub fn run(&mut self) {
        self.start();
        while self.session.is_running() {
            self.iterate();
        }
        info!(
            "stopped at word {} of {}: {} frame(s), {} failed repaint(s)",
            self.session.playback.position(),
            self.tokens.len(),
            self.frames,
            self.failed_repaints
        );
    }

    /// Change the reading rate from the next pacing tick on.
    pub fn set_words_per_minute(&mut self, rate: WordsPerMinute) {
        info!("reading speed now {rate} words per minute");
        self.session.playback.set_words_per_minute(rate);
    }

    /// Session state.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The display.
    pub const fn display(&self) -> &D {
        &self.display
    }

    /// The display, mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The input source, mutably.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The input source.
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// The loaded fonts.
    pub const fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Repaints that failed.
    pub const fn failed_repaints(&self) -> u64 {
        self.failed_repaints
    }

    /// Frames presented.
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl<D: Display, I: InputSource> Drop for App<D, I> {
    fn drop(&mut self) {
        self.fonts.release_all();
    }
}

impl<D: Display, I: InputSource> std::fmt::Debug for App<D, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("reactor", &self.reactor)
            .field("words", &self.tokens.len())
            .field("font", &self.font)
            .field("frames", &self.frames)
            .field("failed_repaints", &self.failed_repaints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, ScriptedInput};
    use crate::error::Error;
    use crate::playback::WARM_UP;
    use crate::reactor::ManualClock;
    use crate::terminal::RecordingDisplay;
    use crate::text::END_OF_TEXT;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    type TestApp = App<RecordingDisplay, ScriptedInput>;

    const SPACE: InputEvent = InputEvent::KeyReleased(KeyCode::SPACE);
    const LEFT: InputEvent = InputEvent::KeyReleased(KeyCode::Left);
    const RIGHT: InputEvent = InputEvent::KeyReleased(KeyCode::Right);
    const ESC: InputEvent = InputEvent::KeyReleased(KeyCode::Esc);

    fn app_with(
        text: &str,
        events: impl IntoIterator<Item = InputEvent>,
        display: RecordingDisplay,
    ) -> (TestApp, ManualClock) {
        let clock = ManualClock::new();
        let input = ScriptedInput::new(events).with_clock(clock.clone());
        let app = App::new(
            ReaderConfig::default(),
            Tokens::parse(text),
            clock.clone(),
            display,
            input,
        )
        .unwrap();
        (app, clock)
    }

    fn app(text: &str, events: impl IntoIterator<Item = InputEvent>) -> (TestApp, ManualClock) {
        app_with(text, events, RecordingDisplay::new())
    }

    fn iterate_until(app: &mut TestApp, clock: &ManualClock, deadline: Instant) {
        while clock.now() < deadline {
            app.iterate();
        }
        // Settle anything due exactly at the deadline.
        app.iterate();
    }

    #[test]
    fn test_first_word_painted_immediately() {
        let (mut app, _clock) = app("alpha beta", []);
        app.start();
        app.iterate();

        assert_eq!(app.display().texts(), vec![Some("alpha")]);
        assert_eq!(app.display().frames()[0].background, Rgb::BLACK);
        assert_eq!(app.display().calls(), ["clear", "draw_centered", "present"]);
        assert!(!app.session().playback.is_dirty());
    }

    #[test]
    fn test_plays_at_word_delay_after_warm_up() {
        let (mut app, clock) = app("w0 w1 w2 w3 w4 w5", [SPACE]);
        let start = clock.now();
        app.start();

        iterate_until(&mut app, &clock, start + WARM_UP + Duration::from_millis(500));

        assert_eq!(
            app.display().texts(),
            vec![Some("w0"), Some("w1"), Some("w2"), Some("w3")]
        );
        assert_eq!(app.session().playback.position(), 3);
    }

    #[test]
    fn test_wait_never_overshoots_next_due() {
        let (mut app, clock) = app("w0 w1 w2 w3", [SPACE]);
        let start = clock.now();
        app.start();

        iterate_until(&mut app, &clock, start + WARM_UP + Duration::from_millis(250));

        let waits = app.input().waits();
        assert_eq!(waits[0], Duration::ZERO);
        assert!(waits.iter().all(|wait| *wait <= Duration::from_millis(100)));
        // Pacing landed exactly on its due times.
        assert_eq!(clock.now() - start, WARM_UP + Duration::from_millis(250));
        assert_eq!(app.session().playback.position(), 2);
    }

    #[test]
    fn test_pause_holds_position() {
        let (mut app, clock) = app("w0 w1 w2 w3 w4", [SPACE]);
        let start = clock.now();
        app.start();

        iterate_until(&mut app, &clock, start + WARM_UP);
        assert_eq!(app.session().playback.position(), 1);

        app.input_mut().push(SPACE);
        iterate_until(&mut app, &clock, start + Duration::from_secs(5));

        assert!(app.session().playback.is_paused());
        assert_eq!(app.session().playback.position(), 1);
        assert_eq!(app.display().texts(), vec![Some("w0"), Some("w1")]);
    }

    #[test]
    fn test_seek_and_clamp() {
        let (mut app, _clock) = app("w0 w1 w2", [LEFT, RIGHT, RIGHT, LEFT]);
        app.start();
        for _ in 0..4 {
            app.iterate();
        }

        assert_eq!(
            app.display().texts(),
            vec![Some("w0"), Some("w1"), Some("w2"), Some("w1")]
        );
        // Seeks are not pacing advances.
        assert_eq!(app.session().monitor.action_count(), 0);
    }

    #[test]
    fn test_past_end_shows_sentinel() {
        let (mut app, _clock) = app("only", [RIGHT, RIGHT]);
        app.start();
        for _ in 0..2 {
            app.iterate();
        }

        assert_eq!(app.display().texts(), vec![Some(END_OF_TEXT), Some(END_OF_TEXT)]);
        assert_eq!(app.session().playback.position(), 2);
    }

    #[test]
    fn test_failed_repaint_logged_and_skipped() {
        let display = RecordingDisplay::new().failing_on("beta");
        let (mut app, _clock) =
            app_with("alpha beta gamma", [InputEvent::Other, RIGHT, RIGHT], display);
        app.start();
        for _ in 0..3 {
            app.iterate();
        }

        assert_eq!(app.failed_repaints(), 1);
        assert_eq!(app.frames(), 2);
        assert_eq!(app.display().texts(), vec![Some("alpha"), Some("gamma")]);
        assert!(!app.session().playback.is_dirty());
    }

    #[test]
    fn test_escape_stops_run() {
        let (mut app, _clock) = app("alpha beta", [ESC]);
        app.run();

        assert!(!app.session().is_running());
        assert!(app.display().frames().is_empty());
    }

    #[test]
    fn test_quit_after_reading() {
        let (mut app, _clock) = app("alpha beta", [RIGHT, InputEvent::Other, InputEvent::Quit]);
        app.run();

        assert_eq!(app.display().texts(), vec![Some("beta")]);
        assert_eq!(app.session().playback.position(), 1);
    }

    #[test]
    fn test_resize_repaints() {
        let (mut app, _clock) = app("alpha", []);
        app.start();
        app.iterate();

        app.display_mut().request_resize();
        app.input_mut().push(InputEvent::Other);
        app.iterate();

        assert_eq!(app.display().texts(), vec![Some("alpha"), Some("alpha")]);
    }

    #[test]
    fn test_rate_change_at_next_tick() {
        let (mut app, clock) = app("w0 w1 w2 w3 w4", [SPACE]);
        let start = clock.now();
        app.start();

        iterate_until(&mut app, &clock, start + WARM_UP);
        app.set_words_per_minute(WordsPerMinute::new(120).unwrap());

        // The tick armed at 240 wpm still lands 250 ms later.
        iterate_until(&mut app, &clock, start + WARM_UP + Duration::from_millis(250));
        assert_eq!(app.session().playback.position(), 2);

        iterate_until(&mut app, &clock, start + WARM_UP + Duration::from_millis(650));
        assert_eq!(app.session().playback.position(), 2);
        iterate_until(&mut app, &clock, start + WARM_UP + Duration::from_millis(750));
        assert_eq!(app.session().playback.position(), 3);
    }

    #[test]
    fn test_unknown_font_fails() {
        let config = ReaderConfig {
            font_name: "Comic-Sans".to_string(),
            ..ReaderConfig::default()
        };
        let err = App::new(
            config,
            Tokens::parse("word"),
            ManualClock::new(),
            RecordingDisplay::new(),
            ScriptedInput::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Font(_)));
    }

    #[test]
    fn test_font_loaded_once() {
        let (app, _clock) = app("word", []);
        assert_eq!(app.fonts().len(), 1);
    }
}
