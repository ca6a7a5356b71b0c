//! Books and the registry that owns them.

#[allow(clippy::module_inception)]
pub mod book;
pub mod manifest;
pub mod registry;

pub use self::book::{Book, BookId};
pub use self::manifest::{BookManifest, DEFAULT_TOC_FILE, MANIFEST_FILE};
pub use self::registry::{BookRegistry, SharedBookRegistry};
