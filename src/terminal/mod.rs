//! Terminal side of the reader: mode guard, display and output encoding.

mod display;
mod output;
mod recording;

pub use display::{measure, Display, RenderStats, TerminalDisplay};
pub use output::OutputBuffer;
pub use recording::{Frame, RecordingDisplay};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute};
use log::{debug, error, info};
use std::io;

/// Window title shown while reading.
pub const TITLE: &str = "FastBookReader v1.0.0";

/// Puts the terminal into reading mode and restores it when dropped.
///
/// Reading mode is raw input, an optional alternate screen, a hidden cursor
/// and, where the terminal supports it, key release reporting.
#[derive(Debug)]
pub struct Terminal {
    raw: bool,
    alternate_screen: bool,
    keyboard_enhanced: bool,
}

impl Terminal {
    /// Enter reading mode.
    ///
    /// # Errors
    ///
    /// Returns the first terminal call that fails. Steps already taken are
    /// undone.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        let mut guard = Self {
            raw: false,
            alternate_screen: false,
            keyboard_enhanced: false,
        };
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        guard.raw = true;
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
            guard.alternate_screen = true;
        }
        execute!(stdout, cursor::Hide, SetTitle(TITLE))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.keyboard_enhanced = true;
        }
        info!(
            "terminal ready (alternate screen: {}, key release: {})",
            guard.alternate_screen, guard.keyboard_enhanced
        );
        Ok(guard)
    }

    /// Whether key releases arrive as their own events.
    pub const fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        if self.raw {
            let _ = terminal::disable_raw_mode();
        }
        debug!("terminal restored");
    }
}

/// Restore the terminal before the default panic report.
///
/// Release builds abort on panic, so [`Terminal`]'s `Drop` never runs there.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            PopKeyboardEnhancementFlags,
            cursor::Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        error!("{info}");
        default_hook(info);
    }));
}
