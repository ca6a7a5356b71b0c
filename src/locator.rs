//! Addressable references into a book.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};

/// Separator between the page id and the anchor in the wire form.
pub const ANCHOR_SEPARATOR: char = '#';

/// A point inside a book: a page plus an optional anchor on that page.
///
/// The wire form is `page` or `page#anchor`. Both parts are opaque; two
/// locators are equal when both parts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator {
    page_id: String,
    anchor_id: Option<String>,
}

impl Locator {
    /// Create a locator for a whole page.
    pub fn page<S: Into<String>>(page_id: S) -> Result<Self> {
        let page_id = page_id.into();
        if page_id.is_empty() {
            return Err(HelpdexError::invalid_locator("empty page id"));
        }
        Ok(Locator {
            page_id,
            anchor_id: None,
        })
    }

    /// Create a locator for an anchor inside a page.
    ///
    /// An empty anchor is treated as no anchor.
    pub fn with_anchor<S: Into<String>, A: Into<String>>(page_id: S, anchor_id: A) -> Result<Self> {
        let mut locator = Locator::page(page_id)?;
        let anchor_id = anchor_id.into();
        if !anchor_id.is_empty() {
            locator.anchor_id = Some(anchor_id);
        }
        Ok(locator)
    }

    /// Parse the `page#anchor` wire form. The first `#` splits the two parts.
    pub fn parse(wire: &str) -> Result<Self> {
        let wire = wire.trim();
        let parsed = match wire.split_once(ANCHOR_SEPARATOR) {
            Some((page, anchor)) => Locator::with_anchor(page, anchor),
            None => Locator::page(wire),
        };
        parsed.map_err(|_| HelpdexError::invalid_locator(format!("{wire:?} has no page id")))
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn anchor_id(&self) -> Option<&str> {
        self.anchor_id.as_deref()
    }

    /// Whether this locator points somewhere on `page_id`.
    pub fn is_on_page(&self, page_id: &str) -> bool {
        self.page_id == page_id
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor_id {
            Some(anchor) => write!(f, "{}{}{}", self.page_id, ANCHOR_SEPARATOR, anchor),
            None => f.write_str(&self.page_id),
        }
    }
}

impl FromStr for Locator {
    type Err = HelpdexError;

    fn from_str(s: &str) -> Result<Self> {
        Locator::parse(s)
    }
}

impl TryFrom<String> for Locator {
    type Error = HelpdexError;

    fn try_from(value: String) -> Result<Self> {
        Locator::parse(&value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.to_string()
    }
}
