//! Display: draws one centred word per frame.
//!
//! [`TerminalDisplay`] owns a double buffer. Each frame is cleared, drawn
//! into `next`, diffed against `current` and flushed with one write, then
//! the buffers swap roles.

use super::output::OutputBuffer;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::{Buffer, Cell, Rgb, Style};
use crate::error::{Error, Result};
use crate::font::Font;
use crate::layout::Rect;
use log::{debug, warn};
use std::io::{self, Write};
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A surface the reader can paint words on.
///
/// A repaint calls [`clear`](Display::clear), then
/// [`draw_centered`](Display::draw_centered), then
/// [`present`](Display::present). Nothing is visible before `present`.
pub trait Display {
    /// Start a new frame filled with `background`.
    fn clear(&mut self, background: Rgb);

    /// Draw `text` centred in the frame.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] if nothing of `text` can be drawn.
    fn draw_centered(&mut self, font: &Font, text: &str) -> Result<()>;

    /// Show the frame.
    ///
    /// # Errors
    ///
    /// [`Error::Terminal`] if writing to the terminal fails.
    fn present(&mut self) -> Result<()>;

    /// Pick up a changed screen size. Returns `true` if the size changed and
    /// the next frame must be repainted.
    fn refresh_size(&mut self) -> bool {
        false
    }
}

/// Columns `text` covers when drawn with `tracking` blank columns between
/// its visible graphemes.
pub fn measure(text: &str, tracking: u16) -> u16 {
    let mut graphemes = 0u16;
    let mut width = 0u16;
    for grapheme in text.graphemes(true) {
        let columns = u16::try_from(grapheme.width().min(2)).unwrap_or(2);
        if columns > 0 {
            graphemes = graphemes.saturating_add(1);
            width = width.saturating_add(columns);
        }
    }
    width.saturating_add(tracking.saturating_mul(graphemes.saturating_sub(1)))
}

/// Frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames presented.
    pub frames: u64,
    /// Cells rewritten across all frames.
    pub cells_changed: u64,
    /// Bytes written to the terminal.
    pub bytes_written: u64,
    /// Duration of the last present in microseconds.
    pub last_render_us: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeSource {
    Terminal,
    Fixed,
}

/// A [`Display`] writing escape sequences to `W`.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    writer: W,
    size: SizeSource,
    current: Buffer,
    next: Buffer,
    background: Rgb,
    diff_state: DiffState,
    output: OutputBuffer,
    needs_full_redraw: bool,
    stats: RenderStats,
}

impl TerminalDisplay<io::Stdout> {
    /// A display on stdout that follows the terminal's size.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        let mut display = Self::with_size(io::stdout(), width, height);
        display.size = SizeSource::Terminal;
        Ok(display)
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// A display of fixed size writing to `writer`.
    pub fn with_size(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            size: SizeSource::Fixed,
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            background: Rgb::BLACK,
            diff_state: DiffState::new(),
            output: OutputBuffer::with_capacity(16 * 1024),
            needs_full_redraw: true,
            stats: RenderStats::default(),
        }
    }

    /// Frame counters so far.
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// The frame most recently presented.
    pub const fn screen(&self) -> &Buffer {
        &self.current
    }

    /// The writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Resize both buffers and repaint everything on the next present.
    /// Returns `false` if the size was already `width × height`.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if (width, height) == (self.next.width(), self.next.height()) {
            return false;
        }
        debug!("display resized to {width}x{height}");
        self.current.resize(width, height);
        self.next.resize(width, height);
        self.needs_full_redraw = true;
        true
    }

    fn follow_terminal_size(&mut self) -> bool {
        if self.size != SizeSource::Terminal {
            return false;
        }
        match crossterm::terminal::size() {
            Ok((width, height)) => self.resize(width, height),
            Err(e) => {
                warn!("querying terminal size failed: {e}");
                false
            }
        }
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn clear(&mut self, background: Rgb) {
        self.follow_terminal_size();
        self.background = background;
        self.next.fill(Cell::blank(background));
    }

    fn draw_centered(&mut self, font: &Font, text: &str) -> Result<()> {
        let render_error = |reason: &str| Error::Render {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let width = measure(text, font.tracking());
        if width == 0 {
            return Err(render_error("nothing visible to draw"));
        }
        let screen = Rect::from_size(self.next.width(), self.next.height());
        if screen.is_empty() {
            return Err(render_error("terminal has no visible area"));
        }

        let area = screen.centered(width, 1);
        let style = Style::new(Rgb::INK, self.background).with_modifiers(font.modifiers());
        let drawn = self.next.draw_str(area.x, area.y, text, style, font.tracking());
        if drawn == 0 {
            return Err(render_error("terminal too narrow"));
        }
        if drawn < width {
            debug!("truncated {text:?} to {drawn} of {width} columns");
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let start = Instant::now();
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.next, &mut self.output, &mut self.diff_state);
            self.stats.cells_changed += self.next.cells().len() as u64;
        } else {
            let result = render_diff(
                &self.current,
                &self.next,
                &mut self.output,
                &mut self.diff_state,
            );
            self.stats.cells_changed += result.cells_changed as u64;
        }

        if !self.output.is_empty() {
            if let Err(e) = self.output.flush_to(&mut self.writer) {
                // The screen is now unknown; repaint in full next time.
                self.needs_full_redraw = true;
                return Err(e.into());
            }
        }
        self.needs_full_redraw = false;
        std::mem::swap(&mut self.current, &mut self.next);

        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.last_render_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        Ok(())
    }

    fn refresh_size(&mut self) -> bool {
        self.follow_terminal_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontCache;
    use pretty_assertions::assert_eq;

    fn font(name: &str, size: u16) -> Font {
        FontCache::new().load(name, size).unwrap()
    }

    fn paint(display: &mut TerminalDisplay<Vec<u8>>, text: &str) -> Result<()> {
        display.clear(Rgb::BLACK);
        display.draw_centered(&font("regular", 12), text)?;
        display.present()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("word", 0), 4);
        assert_eq!(measure("word", 1), 7);
        assert_eq!(measure("語", 2), 2);
        assert_eq!(measure("", 3), 0);
        assert_eq!(measure("e\u{301}", 0), 1);
    }

    #[test]
    fn test_word_centred() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 12, 3);
        paint(&mut display, "word").unwrap();

        assert_eq!(display.screen().row_text(1), "    word    ");
        assert_eq!(display.screen().row_text(0), "            ");
        let cell = display.screen().get(4, 1).unwrap();
        assert_eq!(cell.fg(), Rgb::INK);
        assert_eq!(cell.bg(), Rgb::BLACK);
    }

    #[test]
    fn test_font_face_and_tracking() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 11, 1);
        display.clear(Rgb::BLACK);
        display.draw_centered(&font("SourceCodePro-Bold", 24), "abc").unwrap();
        display.present().unwrap();

        assert_eq!(display.screen().row_text(0), "   a b c   ");
        assert!(display
            .screen()
            .get(3, 0)
            .unwrap()
            .modifiers()
            .contains(crate::buffer::Modifiers::BOLD));
    }

    #[test]
    fn test_long_word_truncated_at_right_edge() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 5, 1);
        paint(&mut display, "incomprehensible").unwrap();
        assert_eq!(display.screen().row_text(0), "incom");
    }

    #[test]
    fn test_second_frame_is_a_diff() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 20, 5);
        paint(&mut display, "first").unwrap();
        let after_first = display.writer().len();
        assert!(String::from_utf8_lossy(display.writer()).contains("\x1b[2J"));

        paint(&mut display, "first").unwrap();
        assert_eq!(display.writer().len(), after_first);

        paint(&mut display, "fist").unwrap();
        let tail = String::from_utf8_lossy(&display.writer()[after_first..]).into_owned();
        assert!(!tail.contains("\x1b[2J"));
        assert_eq!(display.stats().frames, 3);
        assert_eq!(display.screen().row_text(2).trim(), "fist");
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 20, 5);
        paint(&mut display, "word").unwrap();
        let after_first = display.writer().len();

        assert!(display.resize(30, 7));
        assert!(!display.resize(30, 7));
        paint(&mut display, "word").unwrap();

        let tail = String::from_utf8_lossy(&display.writer()[after_first..]).into_owned();
        assert!(tail.contains("\x1b[2J"));
        assert_eq!(display.screen().width(), 30);
        assert_eq!(display.screen().row_text(3).trim(), "word");
    }

    #[test]
    fn test_empty_text_is_render_error() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 20, 5);
        display.clear(Rgb::BLACK);
        let err = display.draw_centered(&font("regular", 12), "").unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }

    #[test]
    fn test_zero_area_is_render_error() {
        let mut display = TerminalDisplay::with_size(Vec::new(), 0, 0);
        display.clear(Rgb::BLACK);
        let err = display.draw_centered(&font("regular", 12), "word").unwrap_err();
        assert!(matches!(err, Error::Render { ref text, .. } if text == "word"));
    }

    #[test]
    fn test_write_failure_is_terminal_error() {
        let mut display = TerminalDisplay::with_size(BrokenPipe, 10, 1);
        display.clear(Rgb::BLACK);
        display.draw_centered(&font("regular", 12), "word").unwrap();
        let err = display.present().unwrap_err();
        assert!(matches!(err, Error::Terminal(_)));
        assert_eq!(display.stats().frames, 0);
    }
}
