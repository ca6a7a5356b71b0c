//! TOC fragments as emitted by the help generator.
//!
//! A fragment is the recorded sequence of `append` calls for one book:
//!
//! ```json
//! {
//!   "title": "Developer Model Library",
//!   "entries": [
//!     { "parent": null, "title": "802.3 LAN/Ethernet", "locator": "mac_802_3.html" },
//!     { "parent": 0, "title": "Description", "locator": "mac_802_3.html#desc" }
//!   ]
//! }
//! ```
//!
//! `parent` is the position of an earlier entry in the same fragment, or
//! `null` to attach to the root.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};
use crate::locator::Locator;
use crate::toc::tree::{TocNodeId, TocTree};

/// One recorded `append` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(default)]
    pub parent: Option<usize>,
    pub title: String,
    pub locator: Locator,
}

/// A full TOC fragment for one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocFragment {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<TocEntry>,
}

impl TocFragment {
    /// Parse a fragment from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Replay the recorded appends into a fresh tree.
    ///
    /// A `parent` that does not name an earlier entry fails with
    /// [`HelpdexError::InvalidParent`].
    pub fn build(&self) -> Result<TocTree> {
        let mut tree = TocTree::create_root(self.title.clone());
        let mut handles: Vec<TocNodeId> = Vec::with_capacity(self.entries.len());

        for (position, entry) in self.entries.iter().enumerate() {
            let parent = match entry.parent {
                None => tree.root(),
                Some(parent) => *handles.get(parent).ok_or_else(|| {
                    HelpdexError::invalid_parent(format!(
                        "entry {position} ({:?}) refers to entry {parent}, which is not earlier in the fragment",
                        entry.title
                    ))
                })?,
            };
            let handle = tree.append(parent, entry.title.clone(), entry.locator.clone())?;
            handles.push(handle);
        }

        Ok(tree)
    }
}
