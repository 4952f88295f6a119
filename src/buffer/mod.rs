//! Frame buffers for the word display.
//!
//! - [`Cell`]: one column, 16 bytes, grapheme stored inline when it fits
//! - [`Buffer`]: a full frame of cells
//! - [`diff`]: turns the change between two frames into escape sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
