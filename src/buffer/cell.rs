//! Cell: one terminal column of a frame.
//!
//! ```text
//! ┌──────────────┬──────────┬────────┬────────┬──────┬───────┬─────────┐
//! │ symbol [u8;4]│ len, cols│ fg rgb │ bg rgb │ mods │ flags │ padding │
//! └──────────────┴──────────┴────────┴────────┴──────┴───────┴─────────┘
//!    4 bytes        2          3        3        1      1        2
//! ```
//!
//! Graphemes of up to four UTF-8 bytes live inline. Longer clusters (base
//! letter plus several combining marks, some Indic conjuncts) are parked in
//! the owning [`Buffer`](super::Buffer) and the cell stores their index.

use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

/// 24-bit colour.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// The reader's word colour.
    pub const INK: Self = Self::new(0, 128, 50);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// SGR text attributes a font face can map onto.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// SGR 1.
        const BOLD = 0b0000_0001;
        /// SGR 2.
        const DIM = 0b0000_0010;
        /// SGR 3.
        const ITALIC = 0b0000_0100;
        /// SGR 4.
        const UNDERLINE = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Storage state of a cell.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// The symbol bytes hold an index into the buffer's overflow list.
        const OVERFLOW = 0b0000_0001;
        /// Right half of a double-width grapheme; draws nothing itself.
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Colours and attributes shared by every cell of one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground colour.
    pub fg: Rgb,
    /// Background colour.
    pub bg: Rgb,
    /// Text attributes.
    pub modifiers: Modifiers,
}

impl Style {
    /// Plain text in `fg` on `bg`.
    #[inline]
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same colours with `modifiers`.
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// One terminal column.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: [u8; 4],
    symbol_len: u8,
    columns: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
    flags: CellFlags,
    _padding: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<Cell>() == 16);

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgb::BLACK)
    }
}

impl Cell {
    /// A space on `bg`.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            symbol: [b' ', 0, 0, 0],
            symbol_len: 1,
            columns: 1,
            fg: Rgb::WHITE,
            bg,
            modifiers: Modifiers::empty(),
            flags: CellFlags::empty(),
            _padding: [0, 0],
        }
    }

    /// A cell holding `grapheme` inline, or `None` if it needs more than
    /// four bytes.
    pub fn from_grapheme(grapheme: &str, style: Style) -> Option<Self> {
        let bytes = grapheme.as_bytes();
        let len = u8::try_from(bytes.len()).ok().filter(|len| *len <= 4)?;
        let mut symbol = [0u8; 4];
        symbol[..bytes.len()].copy_from_slice(bytes);

        Some(Self {
            symbol,
            symbol_len: len,
            columns: columns_of(grapheme),
            ..Self::styled(style)
        })
    }

    /// A cell pointing at entry `index` of the buffer's overflow list.
    #[inline]
    pub const fn overflow(index: u32, columns: u8, style: Style) -> Self {
        Self {
            symbol: index.to_le_bytes(),
            symbol_len: 0,
            columns,
            flags: CellFlags::OVERFLOW,
            ..Self::styled(style)
        }
    }

    /// The right half of a wide grapheme.
    #[inline]
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            symbol: [0; 4],
            symbol_len: 0,
            columns: 0,
            flags: CellFlags::WIDE_CONTINUATION,
            ..Self::styled(style)
        }
    }

    const fn styled(style: Style) -> Self {
        Self {
            fg: style.fg,
            modifiers: style.modifiers,
            ..Self::blank(style.bg)
        }
    }

    /// The inline symbol, or `None` for overflow and continuation cells.
    #[inline]
    pub fn symbol(&self) -> Option<&str> {
        if self.flags.is_empty() {
            std::str::from_utf8(&self.symbol[..usize::from(self.symbol_len)]).ok()
        } else {
            None
        }
    }

    /// Index into the overflow list, for overflow cells.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.symbol))
        } else {
            None
        }
    }

    /// Whether this is the right half of a wide grapheme.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Columns the symbol occupies (0, 1 or 2).
    #[inline]
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Foreground colour.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background colour.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Text attributes.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Storage flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol().unwrap_or("<none>"))
            .field("columns", &self.columns)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Display columns of a grapheme, clamped to two.
pub(crate) fn columns_of(grapheme: &str) -> u8 {
    match grapheme.width() {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}
