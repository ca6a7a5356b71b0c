//! Book manifests.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};

/// Default file name of a manifest inside a book directory.
pub const MANIFEST_FILE: &str = "book.json";

/// Default name of the TOC fragment.
pub const DEFAULT_TOC_FILE: &str = "toc.json";

/// Describes the files that make up one book.
///
/// ```json
/// {
///   "id": "developer",
///   "title": "Developer Model Library",
///   "toc": "toc.json",
///   "shards": ["pairs/pair1.js", "pairs/pair2.js"]
/// }
/// ```
///
/// An empty `shards` list asks the shard source to discover them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookManifest {
    pub id: String,
    pub title: String,
    #[serde(default = "default_toc_file")]
    pub toc: String,
    #[serde(default)]
    pub shards: Vec<String>,
}

fn default_toc_file() -> String {
    DEFAULT_TOC_FILE.to_string()
}

impl BookManifest {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, title: T) -> Self {
        BookManifest {
            id: id.into(),
            title: title.into(),
            toc: default_toc_file(),
            shards: Vec::new(),
        }
    }

    /// Add a shard name.
    pub fn with_shard<S: Into<String>>(mut self, shard: S) -> Self {
        self.shards.push(shard.into());
        self
    }

    /// Set the TOC fragment name.
    pub fn with_toc<S: Into<String>>(mut self, toc: S) -> Self {
        self.toc = toc.into();
        self
    }

    /// Parse and validate a manifest from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let manifest: BookManifest = serde_json::from_slice(bytes)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(HelpdexError::invalid_config("book id must not be empty"));
        }
        if self.toc.trim().is_empty() {
            return Err(HelpdexError::invalid_config(format!(
                "book {} has an empty toc file name",
                self.id
            )));
        }
        Ok(())
    }
}
