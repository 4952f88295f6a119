//! `OutputBuffer`: escape sequences for one frame, flushed in one write.

use crate::buffer::{Modifiers, Rgb};
use std::io::Write;

/// Bytes for one presented frame.
///
/// A frame is built here in full and then handed to the terminal with a
/// single `write_all`, so the terminal never shows half a word.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// An empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Drop the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing was written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append text as-is.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move the cursor to zero-based `(x, y)`, using the shortest CUP form.
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let row = u32::from(y) + 1;
        let col = u32::from(x) + 1;
        // Writes into a Vec cannot fail.
        let _ = match (row, col) {
            (1, 1) => self.data.write_all(b"\x1b[H"),
            (row, 1) => write!(self.data, "\x1b[{row}H"),
            (row, col) => write!(self.data, "\x1b[{row};{col}H"),
        };
    }

    /// Set the true-colour foreground.
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Set the true-colour background.
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Turn on every attribute in `modifiers`.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        for (flag, sgr) in [
            (Modifiers::BOLD, b"\x1b[1m"),
            (Modifiers::DIM, b"\x1b[2m"),
            (Modifiers::ITALIC, b"\x1b[3m"),
            (Modifiers::UNDERLINE, b"\x1b[4m"),
        ] {
            if modifiers.contains(flag) {
                self.data.extend_from_slice(sgr);
            }
        }
    }

    /// SGR 0: colours and attributes back to the terminal default.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Erase the whole screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Write everything to `writer` and flush it.
    ///
    /// # Errors
    ///
    /// Returns the writer's error.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}
