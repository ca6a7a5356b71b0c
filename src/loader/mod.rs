//! Fetching and assembling books.

pub mod book_loader;
pub mod config;
pub mod source;

pub use self::book_loader::{BookLoader, LoadReport};
pub use self::config::LoaderConfig;
pub use self::source::{DirectoryShardSource, MemoryShardSource, PAIRS_DIR, ShardSource, is_shard_name};
