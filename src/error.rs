//! Error types shared across the reader.

use crate::config::ConfigError;
use crate::font::FontError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience result alias for fallible reader operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the reader.
///
/// Everything except [`Error::Render`] and a failing [`Error::Terminal`]
/// write during a repaint is fatal and aborts start-up before the control
/// loop begins.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be read.
    #[error("failed to read text from {}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Invalid start-up configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A font could not be resolved.
    #[error(transparent)]
    Font(#[from] FontError),

    /// Terminal setup or output failed.
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),

    /// A single repaint failed to draw its text.
    #[error("failed to draw {text:?}: {reason}")]
    Render {
        /// The text that was being drawn.
        text: String,
        /// Why the draw failed.
        reason: String,
    },

    /// The file logger could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
