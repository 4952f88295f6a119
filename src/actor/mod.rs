//! Input side of the reader.
//!
//! A dedicated actor thread polls the terminal and forwards events over a
//! crossbeam channel; the main loop only ever sees the closed
//! [`InputEvent`] enum through the [`InputSource`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │  Main Loop   │
//! └──────────────┘   recv_timeout()    └──────────────┘
//! ```

mod input;
mod messages;
mod scripted;

pub use input::{InputActor, TerminalInput};
pub use messages::{InputEvent, KeyCode};
pub use scripted::ScriptedInput;

use std::time::Duration;

/// A blocking source of input events.
pub trait InputSource {
    /// Wait up to `timeout` for the next event.
    ///
    /// A zero timeout never blocks. Returns `None` if nothing arrived.
    fn wait_event(&mut self, timeout: Duration) -> Option<InputEvent>;
}
