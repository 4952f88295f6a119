//! Font resolution for terminal text.
//!
//! A terminal cannot load glyph outlines, so a "font" here is a text face
//! (SGR modifiers) plus letter tracking derived from the requested size.
//! Names resolve case-insensitively by their style suffix, so
//! `SourceCodePro-Bold`, `bold` and `BOLD` are the same face.

use crate::buffer::Modifiers;
use log::{debug, info};
use std::collections::HashMap;
use thiserror::Error;

/// Points of font size per extra column between graphemes.
const POINTS_PER_TRACKING_COLUMN: u16 = 24;

/// Font lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// No face matches the name.
    #[error("unknown font {name:?} (expected regular, bold, italic, underline or dim)")]
    UnknownFace {
        /// Requested font name.
        name: String,
    },
    /// Size zero.
    #[error("font {name:?} requested with size 0")]
    ZeroSize {
        /// Requested font name.
        name: String,
    },
}

/// The faces a terminal can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Plain text.
    Regular,
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Faint text.
    Dim,
}

impl Face {
    /// Resolve a face from a font name such as `SourceCodePro-Regular`.
    pub fn resolve(name: &str) -> Option<Self> {
        let style = name.rsplit('-').next().unwrap_or(name).trim();
        Some(match style.to_ascii_lowercase().as_str() {
            "regular" | "normal" | "book" => Self::Regular,
            "bold" => Self::Bold,
            "italic" | "oblique" => Self::Italic,
            "underline" => Self::Underline,
            "dim" | "light" | "thin" => Self::Dim,
            _ => return None,
        })
    }

    /// SGR modifiers for this face.
    pub const fn modifiers(self) -> Modifiers {
        match self {
            Self::Regular => Modifiers::empty(),
            Self::Bold => Modifiers::BOLD,
            Self::Italic => Modifiers::ITALIC,
            Self::Underline => Modifiers::UNDERLINE,
            Self::Dim => Modifiers::DIM,
        }
    }
}

/// A resolved font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    face: Face,
    size: u16,
}

impl Font {
    /// The face.
    #[inline]
    pub const fn face(&self) -> Face {
        self.face
    }

    /// The requested size.
    #[inline]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// SGR modifiers to draw with.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.face.modifiers()
    }

    /// Blank columns between graphemes.
    #[inline]
    pub const fn tracking(&self) -> u16 {
        self.size / POINTS_PER_TRACKING_COLUMN
    }
}

/// Process-lifetime cache of resolved fonts, one per `(name, size)`.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<(String, u16), Font>,
}

impl FontCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a font, reusing the cached handle for a repeated request.
    pub fn load(&mut self, name: &str, size: u16) -> Result<Font, FontError> {
        let key = (name.to_string(), size);
        if let Some(font) = self.fonts.get(&key) {
            return Ok(*font);
        }

        if size == 0 {
            return Err(FontError::ZeroSize {
                name: name.to_string(),
            });
        }
        let face = Face::resolve(name).ok_or_else(|| FontError::UnknownFace {
            name: name.to_string(),
        })?;

        let font = Font { face, size };
        debug!("resolved font {name:?} size {size} as {font:?}");
        self.fonts.insert(key, font);
        Ok(font)
    }

    /// Number of cached fonts.
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Drop every cached font. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self.fonts.len();
        self.fonts.clear();
        info!("released {released} font(s)");
        released
    }
}
