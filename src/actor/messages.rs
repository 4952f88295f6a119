//! Message types between the input actor and the main loop.

/// Key codes the reader distinguishes.
///
/// A subset of crossterm's `KeyCode`; everything else is dropped at the
/// input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, including space.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Escape key.
    Esc,
}

impl KeyCode {
    /// The space bar.
    pub const SPACE: Self = Self::Char(' ');
}

/// Events delivered to the main loop.
///
/// Only the release transition of a key is ever reported as a key event;
/// presses and repeats arrive as [`InputEvent::Other`], so holding a key
/// down never repeats an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to leave (window close, Ctrl+C).
    Quit,
    /// A key was released.
    KeyReleased(KeyCode),
    /// Anything the reader does not act on.
    Other,
}
