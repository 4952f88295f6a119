//! Buffer: one full frame of cells in row-major order.

use super::cell::{columns_of, Cell, Style};
use unicode_segmentation::UnicodeSegmentation;

/// A `width × height` grid of cells.
///
/// Access is row-major: `index = y * width + x`. Graphemes too long for a
/// cell live in `overflow` until the next [`Buffer::fill`].
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    overflow: Vec<String>,
}

impl Buffer {
    /// A buffer of blank black cells. Either dimension may be zero.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
            width,
            height,
            overflow: Vec::new(),
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// The grapheme drawn at `(x, y)`, resolving overflow storage.
    ///
    /// `None` out of bounds and on the right half of a wide grapheme.
    pub fn grapheme(&self, x: u16, y: u16) -> Option<&str> {
        self.resolve(self.get(x, y)?)
    }

    /// The text a cell draws, looked up in this buffer's overflow list.
    pub fn resolve<'a>(&'a self, cell: &'a Cell) -> Option<&'a str> {
        match cell.overflow_index() {
            Some(index) => self
                .overflow
                .get(usize::try_from(index).ok()?)
                .map(String::as_str),
            None => cell.symbol(),
        }
    }

    /// Overwrite every cell and forget overflow graphemes.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
        self.overflow.clear();
    }

    /// Put one grapheme at `(x, y)`.
    ///
    /// A wide grapheme also claims `(x + 1, y)`; if that column is off the
    /// buffer nothing is drawn. Returns the columns used, 0 if the grapheme
    /// did not fit.
    pub fn put_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u16 {
        let columns = columns_of(grapheme);
        let Some(index) = self.index_of(x, y) else {
            return 0;
        };
        let continuation = if columns == 2 {
            match self.index_of(x + 1, y) {
                Some(next) => Some(next),
                None => return 0,
            }
        } else {
            None
        };

        self.cells[index] = match Cell::from_grapheme(grapheme, style) {
            Some(cell) => cell,
            None => {
                let Ok(slot) = u32::try_from(self.overflow.len()) else {
                    return 0;
                };
                self.overflow.push(grapheme.to_string());
                Cell::overflow(slot, columns, style)
            }
        };
        if let Some(next) = continuation {
            self.cells[next] = Cell::wide_continuation(style);
        }
        u16::from(columns)
    }

    /// Draw `text` on row `y` starting at column `x`, leaving `tracking`
    /// blank columns between graphemes.
    ///
    /// Drawing stops at the first grapheme that would cross the right edge.
    /// Zero-width graphemes are skipped. Returns the columns covered.
    pub fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style, tracking: u16) -> u16 {
        let mut cursor = x;
        let mut covered = 0;
        for grapheme in text.graphemes(true) {
            if columns_of(grapheme) == 0 {
                continue;
            }
            if cursor != x {
                cursor = cursor.saturating_add(tracking);
            }
            let used = self.put_grapheme(cursor, y, grapheme, style);
            if used == 0 {
                break;
            }
            cursor = cursor.saturating_add(used);
            covered = cursor - x;
        }
        covered
    }

    /// Change dimensions, discarding all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// The text of row `y` with continuation cells dropped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.grapheme(x, y))
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow", &self.overflow.len())
            .finish_non_exhaustive()
    }
}
