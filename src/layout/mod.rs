//! Screen geometry.

mod rect;

pub use rect::Rect;
