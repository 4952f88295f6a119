//! A display that remembers frames instead of drawing them.

use super::display::Display;
use crate::buffer::Rgb;
use crate::error::{Error, Result};
use crate::font::Font;

/// One presented frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Clear colour.
    pub background: Rgb,
    /// Text drawn, if the draw succeeded.
    pub text: Option<String>,
    /// Font the text was drawn with.
    pub font: Option<Font>,
}

/// Records every presented frame. Can be told to fail draws of one word.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pending: Option<Frame>,
    frames: Vec<Frame>,
    fail_on: Option<String>,
    resized: bool,
    calls: Vec<&'static str>,
}

impl RecordingDisplay {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every draw of `text` fail with a render error.
    #[must_use]
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on = Some(text.into());
        self
    }

    /// Report a size change on the next [`Display::refresh_size`].
    pub fn request_resize(&mut self) {
        self.resized = true;
    }

    /// Presented frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Text of every presented frame.
    pub fn texts(&self) -> Vec<Option<&str>> {
        self.frames.iter().map(|frame| frame.text.as_deref()).collect()
    }

    /// Trait methods in call order.
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self, background: Rgb) {
        self.calls.push("clear");
        self.pending = Some(Frame {
            background,
            text: None,
            font: None,
        });
    }

    fn draw_centered(&mut self, font: &Font, text: &str) -> Result<()> {
        self.calls.push("draw_centered");
        if self.fail_on.as_deref() == Some(text) {
            return Err(Error::Render {
                text: text.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        let frame = self.pending.get_or_insert(Frame {
            background: Rgb::BLACK,
            text: None,
            font: None,
        });
        frame.text = Some(text.to_string());
        frame.font = Some(*font);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push("present");
        if let Some(frame) = self.pending.take() {
            self.frames.push(frame);
        }
        Ok(())
    }

    fn refresh_size(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}
