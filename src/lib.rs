//! # Helpdex
//!
//! Offline documentation-help engine: a table of contents per book, a
//! word-association index built from generated pair shards, and a query
//! engine that ranks books by association evidence.
//!
//! ## Features
//!
//! - Arena-backed TOC trees with pre-order flattening and page sync
//! - Association index merged from concurrently loaded shards
//! - Plain, phrase, prefix and wildcard queries
//! - Localized UI message catalog
//!
//! ## Example
//!
//! ```
//! use helpdex::prelude::*;
//!
//! let mut toc = TocTree::create_root("Developer");
//! let root = toc.root();
//! toc.append(root, "ICMP", Locator::parse("icmp.html").unwrap()).unwrap();
//!
//! let index = AssociationIndex::merge([PairEntry::new("icmp", "error").unwrap()]);
//! let mut registry = BookRegistry::new();
//! registry.register(Book::new("dev", "Developer", toc, index)).unwrap();
//!
//! let hits = search(&registry, "icmp", &SearchConfig::default());
//! assert_eq!(hits[0].book_id(), "dev");
//! assert_eq!(hits[0].entry.as_ref().unwrap().page_id(), "icmp.html");
//! ```

pub mod book;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod locator;
pub mod messages;
pub mod search;
pub mod toc;
pub mod word;

pub mod prelude {
    pub use crate::book::{Book, BookManifest, BookRegistry, SharedBookRegistry};
    pub use crate::config::HelpdexConfig;
    pub use crate::error::{HelpdexError, Result};
    pub use crate::index::{AssociationIndex, PairEntry};
    pub use crate::loader::{BookLoader, DirectoryShardSource, LoaderConfig, MemoryShardSource};
    pub use crate::locator::Locator;
    pub use crate::search::{QueryEngine, SearchConfig, SearchHit, SearchScope, search};
    pub use crate::toc::{TocNode, TocNodeId, TocTree};
    pub use crate::word::Word;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
