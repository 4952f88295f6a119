//! Input dispatcher: maps input events onto session transitions.

use crate::actor::{InputEvent, KeyCode};
use crate::session::Session;
use log::debug;

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event changed playback state.
    Handled,
    /// The event was not bound to anything.
    Ignored,
    /// The event ended the session.
    Terminate,
}

/// Apply one input event to the session.
///
/// | event                  | effect            |
/// |------------------------|-------------------|
/// | `Quit`                 | stop              |
/// | released `Esc`         | stop              |
/// | released space         | toggle pause      |
/// | released `Left`        | step back         |
/// | released `Right`       | step forward      |
/// | anything else          | nothing           |
pub fn dispatch(event: InputEvent, session: &mut Session) -> Dispatch {
    match event {
        InputEvent::Quit | InputEvent::KeyReleased(KeyCode::Esc) => {
            debug!("quit = {event:?}");
            session.stop();
            Dispatch::Terminate
        }
        InputEvent::KeyReleased(KeyCode::SPACE) => {
            session.playback.toggle_pause();
            debug!("Pause = {}", session.playback.is_paused());
            Dispatch::Handled
        }
        InputEvent::KeyReleased(KeyCode::Left) => {
            session.playback.step_back();
            Dispatch::Handled
        }
        InputEvent::KeyReleased(KeyCode::Right) => {
            session.playback.step_forward();
            Dispatch::Handled
        }
        InputEvent::KeyReleased(_) | InputEvent::Other => Dispatch::Ignored,
    }
}
