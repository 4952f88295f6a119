//! File logging.
//!
//! The reader owns the terminal while it runs, so log records go to a file
//! that is truncated at every start.

use crate::error::{Error, Result};
use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Install a [`WriteLogger`] writing to `path` at `level`.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be created, [`Error::Logging`] if a
/// logger is already installed.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, new_config(), file)?;
    Ok(())
}

fn new_config() -> Config {
    let mut builder = ConfigBuilder::new();
    // Stays UTC if the local offset cannot be determined.
    let _ = builder.set_time_offset_to_local();
    builder
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build()
}
