//! Table-of-contents trees and navigation.

pub mod fragment;
pub mod tree;

pub use self::fragment::{TocEntry, TocFragment};
pub use self::tree::{Ancestors, Flatten, TocNode, TocNodeId, TocTree};
