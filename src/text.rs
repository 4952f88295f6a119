//! Token source: splits a text into the words shown one at a time.
//!
//! Letters and numbers (general categories L and N) accumulate into a word.
//! Punctuation (category P) and whitespace end it. Anything else (symbols
//! such as `$` or `+`, emoji, combining marks, replacement characters) is
//! logged and skipped: it neither joins nor separates, so `a+b` reads as `ab`.

use crate::error::{Error, Result};
use log::debug;
use std::fmt;
use std::path::Path;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Shown once the cursor runs past the last word.
pub const END_OF_TEXT: &str = "- THE END -";

/// The token at a position, or the end-of-text sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word<'a> {
    /// A word of the text.
    Token(&'a str),
    /// The position is past the last word.
    End,
}

impl<'a> Word<'a> {
    /// Text to display.
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Token(word) => *word,
            Self::End => END_OF_TEXT,
        }
    }

    /// Whether this is the sentinel.
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl fmt::Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Separator,
    Unknown,
}

fn classify(c: char) -> CharClass {
    match c.general_category_group() {
        GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number => CharClass::Word,
        GeneralCategoryGroup::Punctuation => CharClass::Separator,
        _ if c.is_whitespace() => CharClass::Separator,
        _ => CharClass::Unknown,
    }
}

/// The words of a text, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    words: Vec<String>,
}

impl Tokens {
    /// Split `text` into words.
    pub fn parse(text: &str) -> Self {
        let mut words = Vec::new();
        let mut word = String::new();

        for c in text.chars() {
            match classify(c) {
                CharClass::Word => word.push(c),
                CharClass::Separator => {
                    if !word.is_empty() {
                        words.push(std::mem::take(&mut word));
                    }
                }
                CharClass::Unknown => debug!("unknown: ch = {c:?}"),
            }
        }
        // A trailing word with no separator after it still counts.
        if !word.is_empty() {
            words.push(word);
        }

        Self { words }
    }

    /// Read and split a UTF-8 file. Invalid sequences become U+FFFD, which
    /// is then skipped like any other unknown character.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tokens = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!("loaded {} words from {}", tokens.len(), path.display());
        Ok(tokens)
    }

    /// The word at `index`, or [`Word::End`] past the last one.
    pub fn get(&self, index: usize) -> Word<'_> {
        self.words
            .get(index)
            .map_or(Word::End, |word| Word::Token(word))
    }

    /// Number of words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the text had no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
