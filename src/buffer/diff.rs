//! Diffing: turn the change between two frames into escape sequences.
//!
//! Only cells that differ are written. The cursor is moved only when the
//! next changed cell is not where the previous write left it, and colours
//! and attributes are emitted only when they change.

use super::{Buffer, Cell, Modifiers, Rgb};
use crate::terminal::OutputBuffer;

/// What the terminal is believed to hold after the last write.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// Nothing known about the terminal.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything, e.g. after a screen clear.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    fn apply_style(&mut self, cell: &Cell, output: &mut OutputBuffer) {
        let wanted = cell.modifiers();
        let current = self.modifiers.unwrap_or_else(Modifiers::empty);
        // SGR has no portable per-attribute "off", so dropping one resets all.
        if !current.difference(wanted).is_empty() {
            output.reset_attrs();
            *self = Self {
                cursor: self.cursor,
                ..Self::new()
            };
        }
        if self.fg != Some(cell.fg()) {
            output.set_fg(cell.fg());
            self.fg = Some(cell.fg());
        }
        if self.bg != Some(cell.bg()) {
            output.set_bg(cell.bg());
            self.bg = Some(cell.bg());
        }
        if self.modifiers != Some(wanted) {
            let current = self.modifiers.unwrap_or_else(Modifiers::empty);
            output.set_modifiers(wanted.difference(current));
            self.modifiers = Some(wanted);
        }
    }
}

/// Counters from one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells written.
    pub cells_changed: usize,
    /// Cursor moves emitted.
    pub cursor_moves: usize,
}

/// Write the cells of `next` that differ from `current`.
///
/// Both buffers must have the same dimensions; use [`render_full`] after a
/// resize.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut OutputBuffer,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(
        (current.width(), current.height()),
        (next.width(), next.height())
    );

    let mut result = DiffResult::default();
    let width = usize::from(next.width().max(1));

    for (index, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new && current.resolve(old) == next.resolve(new) {
            continue;
        }
        if new.is_wide_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((index % width) as u16, (index / width) as u16);

        if state.cursor != Some((x, y)) {
            output.cursor_move(x, y);
            result.cursor_moves += 1;
        }
        state.apply_style(new, output);
        emit_symbol(new, next, output);
        state.cursor = Some((x.saturating_add(u16::from(new.columns().max(1))), y));
        result.cells_changed += 1;
    }

    result
}

/// Repaint every cell of `buffer` from the top-left corner.
pub fn render_full(buffer: &Buffer, output: &mut OutputBuffer, state: &mut DiffState) {
    state.reset();
    output.reset_attrs();
    output.clear_screen();

    for (y, row) in (0u16..).zip(buffer.rows()) {
        output.cursor_move(0, y);
        for cell in row.iter().filter(|cell| !cell.is_wide_continuation()) {
            state.apply_style(cell, output);
            emit_symbol(cell, buffer, output);
        }
    }
    state.cursor = None;
}

fn emit_symbol(cell: &Cell, buffer: &Buffer, output: &mut OutputBuffer) {
    output.write_str(buffer.resolve(cell).unwrap_or(" "));
}
