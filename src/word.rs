//! Normalized index words.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};

/// Separator between the two sides of a pair-table entry.
///
/// A word can never contain it, so an entry always splits unambiguously.
pub const PAIR_DELIMITER: char = ',';

/// A case-folded, whitespace-trimmed token.
///
/// `Word` is the key type of the association index and the unit query terms
/// are resolved against. It is never empty and never contains
/// [`PAIR_DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Normalize `raw` into a word.
    ///
    /// Fails with [`HelpdexError::MalformedEntry`] when nothing is left after
    /// trimming or the token contains the pair delimiter.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HelpdexError::malformed(format!(
                "empty word after trimming {raw:?}"
            )));
        }
        if trimmed.contains(PAIR_DELIMITER) {
            return Err(HelpdexError::malformed(format!(
                "word {trimmed:?} contains the pair delimiter"
            )));
        }
        Ok(Word(trimmed.to_lowercase()))
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this word starts with `prefix`.
    pub fn starts_with(&self, prefix: &Word) -> bool {
        self.0.starts_with(prefix.as_str())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Word {
    type Error = HelpdexError;

    fn try_from(value: String) -> Result<Self> {
        Word::new(&value)
    }
}

impl TryFrom<&str> for Word {
    type Error = HelpdexError;

    fn try_from(value: &str) -> Result<Self> {
        Word::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}
