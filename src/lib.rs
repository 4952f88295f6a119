//! # rsvp
//!
//! A terminal speed reader. Words of a text are flashed one at a time in the
//! middle of the screen at a fixed rate (rapid serial visual presentation).
//!
//! ## Core Concepts
//!
//! - **Cooperative reactor**: one-shot timed callbacks fired from the main
//!   loop, re-armed by the callbacks themselves
//! - **Playback**: a paced reading cursor that can be paused and stepped
//! - **Diagnostics**: actions per second, sampled on a drift-free grid
//! - **Double-buffered display**: each word is diffed against the last frame
//!   and written in one syscall
//! - **Input actor**: a thread polling the terminal, feeding a channel
//!
//! ## Example
//!
//! ```rust,ignore
//! use rsvp::{App, ReaderConfig, RecordingDisplay, ScriptedInput, SystemClock, Tokens};
//!
//! let tokens = Tokens::parse("Hello, world! Go-go.");
//! let mut app = App::new(
//!     ReaderConfig::default(),
//!     tokens,
//!     SystemClock,
//!     RecordingDisplay::new(),
//!     ScriptedInput::default(),
//! )?;
//! app.start();
//! app.iterate();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod font;
pub mod layout;
pub mod logging;
pub mod monitor;
pub mod playback;
pub mod reactor;
pub mod session;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use actor::{InputEvent, InputSource, KeyCode, ScriptedInput, TerminalInput};
pub use app::App;
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use config::{Cli, ConfigError, ReaderConfig, WordsPerMinute};
pub use dispatch::{dispatch, Dispatch};
pub use error::{Error, Result};
pub use font::{Font, FontCache, FontError};
pub use monitor::Monitor;
pub use playback::Playback;
pub use reactor::{Clock, ManualClock, Reactor, SystemClock};
pub use session::Session;
pub use terminal::{Display, RecordingDisplay, TerminalDisplay};
pub use text::{Tokens, Word, END_OF_TEXT};
