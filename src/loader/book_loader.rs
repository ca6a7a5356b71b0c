//! Asynchronous book loading.
//!
//! Loading a book fans out one task per pair shard (fetch, decode, normalize)
//! and joins on all of them before merging the association index. A shard
//! that fails is logged and left out; its siblings and the book as a whole
//! still load. The TOC fragment is replayed synchronously once fetched.
//!
//! Nothing is registered until [`BookLoader::load_book`] returns, so dropping
//! the future cancels the load without leaving partial state behind.
//!
//! The loader itself only needs a futures executor. A tokio runtime is
//! required when a shard timeout is configured or the source is a
//! [`DirectoryShardSource`](crate::loader::source::DirectoryShardSource).

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::book::book::Book;
use crate::book::manifest::{BookManifest, MANIFEST_FILE};
use crate::book::registry::SharedBookRegistry;
use crate::error::{HelpdexError, Result};
use crate::index::association::AssociationIndex;
use crate::index::pairs::{PairEntry, PairShardLoader};
use crate::index::shard_format::parse_pair_script;
use crate::loader::config::LoaderConfig;
use crate::loader::source::ShardSource;
use crate::toc::fragment::TocFragment;
use crate::toc::tree::TocTree;

/// What happened while loading one book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub book_id: String,
    /// Shards that contributed to the index, sorted by name.
    pub loaded_shards: Vec<String>,
    /// Shards that were dropped, with the reason, sorted by name.
    pub failed_shards: Vec<(String, String)>,
    /// Pair entries merged into the index (duplicates included).
    pub merged_entries: usize,
    /// Entries or registration calls skipped as malformed.
    pub malformed_entries: usize,
}

impl LoadReport {
    /// Whether every shard loaded and no entry was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed_shards.is_empty() && self.malformed_entries == 0
    }
}

/// Entries produced by one successful shard task.
#[derive(Debug)]
struct ShardOutcome {
    entries: Vec<PairEntry>,
    malformed: usize,
}

/// Loads books from a [`ShardSource`].
#[derive(Debug)]
pub struct BookLoader<S: ShardSource> {
    source: S,
    config: LoaderConfig,
    pair_loader: PairShardLoader,
}

impl<S: ShardSource> BookLoader<S> {
    /// Create a loader after validating `config`.
    pub fn new(source: S, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(BookLoader {
            source,
            config,
            pair_loader: PairShardLoader::new(),
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch and parse the source's `book.json`.
    pub async fn load_manifest(&self) -> Result<BookManifest> {
        let bytes = self.source.fetch(MANIFEST_FILE).await?;
        BookManifest::from_slice(&bytes)
    }

    /// Load the manifest, then the book it describes.
    pub async fn load(&self) -> Result<(Book, LoadReport)> {
        let manifest = self.load_manifest().await?;
        self.load_book(manifest).await
    }

    /// Load a book and register it. The book only becomes visible to
    /// queries once it is complete.
    pub async fn load_into(&self, registry: &SharedBookRegistry) -> Result<LoadReport> {
        let (book, report) = self.load().await?;
        registry.register(book)?;
        Ok(report)
    }

    /// Build the book described by `manifest`.
    ///
    /// Shard failures are absorbed into the report. A missing or invalid
    /// TOC fragment fails the whole load.
    pub async fn load_book(&self, manifest: BookManifest) -> Result<(Book, LoadReport)> {
        manifest.validate()?;

        let shard_names = if manifest.shards.is_empty() {
            self.source.list_shards().await?
        } else {
            manifest.shards.clone()
        };

        let toc = self.load_toc(&manifest.toc).await?;
        let (index, mut report) = self.load_index(&shard_names).await;
        report.book_id = manifest.id.clone();

        info!(
            "loaded book {}: {} shards ok, {} failed, {} entries, {} malformed",
            manifest.id,
            report.loaded_shards.len(),
            report.failed_shards.len(),
            report.merged_entries,
            report.malformed_entries
        );

        Ok((Book::from_manifest(manifest, toc, index), report))
    }

    /// Fetch a TOC fragment and replay it into a tree.
    pub async fn load_toc(&self, name: &str) -> Result<TocTree> {
        let bytes = self.source.fetch(name).await?;
        TocFragment::from_slice(&bytes)?.build()
    }

    /// Run every shard task and merge what succeeded.
    pub async fn load_index(&self, shard_names: &[String]) -> (AssociationIndex, LoadReport) {
        let outcomes: Vec<(&String, Result<ShardOutcome>)> = stream::iter(shard_names)
            .map(|name| async move { (name, self.load_shard(name).await) })
            .buffer_unordered(self.config.max_concurrent_shards)
            .collect()
            .await;

        let mut index = AssociationIndex::new();
        let mut report = LoadReport::default();

        for (name, outcome) in outcomes {
            match outcome {
                Ok(shard) => {
                    report.merged_entries += shard.entries.len();
                    report.malformed_entries += shard.malformed;
                    report.loaded_shards.push(name.clone());
                    index.merge_into(shard.entries);
                }
                Err(e) => {
                    warn!("dropping shard {name}: {e}");
                    report.failed_shards.push((name.clone(), e.to_string()));
                }
            }
        }

        report.loaded_shards.sort();
        report.failed_shards.sort();
        (index, report)
    }

    async fn load_shard(&self, name: &str) -> Result<ShardOutcome> {
        let fetch = self.source.fetch(name);
        let bytes = match self.config.shard_timeout() {
            Some(timeout) => tokio::time::timeout(timeout, fetch).await.map_err(|_| {
                HelpdexError::shard_failure(name, format!("timed out after {timeout:?}"))
            })??,
            None => fetch.await?,
        };

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| HelpdexError::shard_failure(name, format!("not valid UTF-8: {e}")))?;

        let script = parse_pair_script(text);
        for line in &script.rejected_lines {
            debug!("{name}:{line}: undecodable pair registration");
        }

        let shard = self.pair_loader.load(script.pairs);
        for error in &shard.malformed {
            debug!("{name}: {error}");
        }

        Ok(ShardOutcome {
            malformed: shard.malformed_count() + script.rejected_lines.len(),
            entries: shard.entries,
        })
    }
}
