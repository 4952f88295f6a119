//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The actor turns crossterm events into [`InputEvent`]s and forwards them
//! over a bounded channel. The main loop's blocking wait is a timed receive
//! on that channel, so no reader state is ever touched off the main thread.

use super::messages::{InputEvent, KeyCode};
use super::InputSource;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long the actor blocks in crossterm before re-checking shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the main loop.
    /// * `reports_release` - Whether the terminal reports key releases. If
    ///   not, each press stands for a completed press and release.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(sender: Sender<InputEvent>, reports_release: bool) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("rsvp-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, reports_release);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, reports_release: bool) {
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        let input = convert_event(&event, reports_release);
                        if sender.send(input).is_err() {
                            // Receiver dropped, exit
                            break;
                        }
                    }
                    Err(e) => error!("reading terminal event failed: {e}"),
                },
                Ok(false) => {}
                Err(e) => {
                    error!("polling terminal events failed: {e}");
                    let _ = sender.send(InputEvent::Quit);
                    break;
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for InputActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputActor")
            .field("running", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}

/// Convert a crossterm event to our [`InputEvent`].
fn convert_event(event: &Event, reports_release: bool) -> InputEvent {
    match event {
        Event::Key(key) => convert_key_event(key, reports_release),
        _ => InputEvent::Other,
    }
}

fn convert_key_event(key: &KeyEvent, reports_release: bool) -> InputEvent {
    // Raw mode swallows SIGINT; Ctrl+C is the terminal's "close window".
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == event::KeyCode::Char('c')
        && key.kind == KeyEventKind::Press
    {
        return InputEvent::Quit;
    }

    let released = match key.kind {
        KeyEventKind::Release => true,
        KeyEventKind::Press => !reports_release,
        KeyEventKind::Repeat => false,
    };
    if !released {
        return InputEvent::Other;
    }

    match convert_key_code(key.code) {
        Some(code) => InputEvent::KeyReleased(code),
        None => {
            debug!("ignoring key {:?}", key.code);
            InputEvent::Other
        }
    }
}

/// Convert crossterm `KeyCode` to our `KeyCode`.
fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

/// Terminal input: the actor plus the receiving end of its channel.
#[derive(Debug)]
pub struct TerminalInput {
    receiver: Receiver<InputEvent>,
    actor: Option<InputActor>,
}

impl TerminalInput {
    /// Spawn the input actor.
    pub fn spawn(reports_release: bool) -> std::io::Result<Self> {
        let (sender, receiver) = bounded::<InputEvent>(64);
        let actor = InputActor::spawn(sender, reports_release)?;
        Ok(Self {
            receiver,
            actor: Some(actor),
        })
    }
}

impl InputSource for TerminalInput {
    fn wait_event(&mut self, timeout: Duration) -> Option<InputEvent> {
        if timeout.is_zero() {
            return match self.receiver.try_recv() {
                Ok(event) => Some(event),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    error!("input channel disconnected");
                    Some(InputEvent::Quit)
                }
            };
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                error!("input channel disconnected");
                Some(InputEvent::Quit)
            }
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Some(actor) = self.actor.take() {
            actor.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: event::KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_release_reported() {
        let event = key(event::KeyCode::Char(' '), KeyEventKind::Release);
        assert_eq!(
            convert_event(&event, true),
            InputEvent::KeyReleased(KeyCode::SPACE)
        );
    }

    #[test]
    fn test_press_ignored_when_release_reported() {
        let event = key(event::KeyCode::Left, KeyEventKind::Press);
        assert_eq!(convert_event(&event, true), InputEvent::Other);
    }

    #[test]
    fn test_repeat_never_triggers() {
        let event = key(event::KeyCode::Right, KeyEventKind::Repeat);
        assert_eq!(convert_event(&event, true), InputEvent::Other);
        assert_eq!(convert_event(&event, false), InputEvent::Other);
    }

    #[test]
    fn test_press_stands_for_release_without_reporting() {
        let event = key(event::KeyCode::Esc, KeyEventKind::Press);
        assert_eq!(
            convert_event(&event, false),
            InputEvent::KeyReleased(KeyCode::Esc)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(
            event::KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(convert_event(&event, true), InputEvent::Quit);
    }

    #[test]
    fn test_other_events() {
        assert_eq!(convert_event(&Event::Resize(80, 24), true), InputEvent::Other);
        assert_eq!(convert_event(&Event::FocusGained, true), InputEvent::Other);
        let f1 = key(event::KeyCode::F(1), KeyEventKind::Release);
        assert_eq!(convert_event(&f1, true), InputEvent::Other);
    }

    #[test]
    fn test_wait_event_disconnected_quits() {
        let (sender, receiver) = bounded::<InputEvent>(1);
        drop(sender);
        let mut input = TerminalInput {
            receiver,
            actor: None,
        };
        assert_eq!(input.wait_event(Duration::ZERO), Some(InputEvent::Quit));
        assert_eq!(
            input.wait_event(Duration::from_millis(1)),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn test_wait_event_timeout() {
        let (sender, receiver) = bounded::<InputEvent>(1);
        let mut input = TerminalInput {
            receiver,
            actor: None,
        };
        assert_eq!(input.wait_event(Duration::from_millis(1)), None);
        sender.send(InputEvent::Other).unwrap();
        assert_eq!(input.wait_event(Duration::ZERO), Some(InputEvent::Other));
    }
}
