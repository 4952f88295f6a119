//! Start-up configuration.
//!
//! The command line is parsed once into [`Cli`], validated into an immutable
//! [`ReaderConfig`], and then passed by reference to whatever needs it.

use clap::Parser;
use log::LevelFilter;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Milliseconds in one minute, the numerator of the inter-word delay.
const MS_PER_MINUTE: u32 = 60_000;

/// Configuration errors, all detected before the control loop starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Reading rate was zero or negative.
    #[error("words per minute must be positive, got {0}")]
    NonPositiveRate(i64),
    /// Reading rate was not a number.
    #[error("words per minute must be an integer, got {0:?}")]
    InvalidRate(String),
    /// Reading rate does not fit the rate type.
    #[error("words per minute {0} is too large")]
    RateTooLarge(i64),
    /// Font size of zero.
    #[error("font size must be positive")]
    ZeroFontSize,
    /// Input poll timeout of zero would turn the loop into a busy spin.
    #[error("input poll timeout must be positive")]
    ZeroPollTimeout,
}

/// A positive reading rate.
///
/// Zero is unrepresentable, so the tick arithmetic never divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordsPerMinute(NonZeroU32);

impl WordsPerMinute {
    /// The default reading rate.
    pub const DEFAULT: Self = match NonZeroU32::new(240) {
        Some(rate) => Self(rate),
        None => unreachable!(),
    };

    /// Validate a raw rate.
    pub fn new(rate: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(rate)
            .map(Self)
            .ok_or(ConfigError::NonPositiveRate(0))
    }

    /// The raw rate.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// How long each word stays on screen: `60000 / wpm` milliseconds,
    /// truncated to whole milliseconds.
    #[inline]
    pub const fn word_delay(self) -> Duration {
        Duration::from_millis((MS_PER_MINUTE / self.0.get()) as u64)
    }
}

impl Default for WordsPerMinute {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for WordsPerMinute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WordsPerMinute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidRate(s.to_string()))?;
        if raw <= 0 {
            return Err(ConfigError::NonPositiveRate(raw));
        }
        let rate = u32::try_from(raw).map_err(|_| ConfigError::RateTooLarge(raw))?;
        Self::new(rate)
    }
}

/// Command line of the `rsvp` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "rsvp", version, about = "Read a text file one word at a time")]
pub struct Cli {
    /// Text file to read.
    #[arg(default_value = "example.txt")]
    pub path: PathBuf,

    /// Reading speed in words per minute.
    #[arg(long, short = 'w', default_value = "240", allow_negative_numbers = true)]
    pub wpm: WordsPerMinute,

    /// Font face, optionally prefixed by a family (`SourceCodePro-Bold`).
    #[arg(long, default_value = "SourceCodePro-Regular")]
    pub font: String,

    /// Font size; larger sizes add letter spacing.
    #[arg(long, default_value_t = 36)]
    pub font_size: u16,

    /// Upper bound of each blocking input wait, in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub poll_timeout_ms: u64,

    /// Log file (the terminal itself is occupied by the reader).
    #[arg(long, default_value = "rsvp.log")]
    pub log_file: PathBuf,

    /// Log level filter.
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Draw on the main screen instead of the alternate screen.
    #[arg(long)]
    pub no_alternate_screen: bool,
}

/// Immutable reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Source text.
    pub text_path: PathBuf,
    /// Initial reading rate.
    pub words_per_minute: WordsPerMinute,
    /// Font face name.
    pub font_name: String,
    /// Font size.
    pub font_size: u16,
    /// Upper bound of each blocking input wait.
    pub poll_timeout: Duration,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            text_path: PathBuf::from("example.txt"),
            words_per_minute: WordsPerMinute::DEFAULT,
            font_name: "SourceCodePro-Regular".to_string(),
            font_size: 36,
            poll_timeout: Duration::from_millis(100),
            alternate_screen: true,
        }
    }
}

impl TryFrom<Cli> for ReaderConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.font_size == 0 {
            return Err(ConfigError::ZeroFontSize);
        }
        if cli.poll_timeout_ms == 0 {
            return Err(ConfigError::ZeroPollTimeout);
        }
        Ok(Self {
            text_path: cli.path,
            words_per_minute: cli.wpm,
            font_name: cli.font,
            font_size: cli.font_size,
            poll_timeout: Duration::from_millis(cli.poll_timeout_ms),
            alternate_screen: !cli.no_alternate_screen,
        })
    }
}
