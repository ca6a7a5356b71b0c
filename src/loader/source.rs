//! Shard sources: where book files come from.
//!
//! The loader only needs one capability from its environment, fetching a
//! named file of a book. [`ShardSource`] abstracts it so the same loading
//! code runs against a directory on disk or against files held in memory.

use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};

use ahash::AHashMap;
use async_trait::async_trait;
use log::debug;

use crate::error::{HelpdexError, Result};

/// Directory holding the pair shards, relative to a book root.
pub const PAIRS_DIR: &str = "pairs";

/// Provides the raw bytes of a book's files by name.
#[async_trait]
pub trait ShardSource: Send + Sync + Debug {
    /// Fetch the file called `name`.
    ///
    /// Failures are reported as [`HelpdexError::ShardLoadFailure`].
    async fn fetch(&self, name: &str) -> Result<Vec<u8>>;

    /// Names of every pair shard this source can provide.
    ///
    /// Used when a manifest does not list its shards.
    async fn list_shards(&self) -> Result<Vec<String>>;
}

/// Whether `name` looks like a generated pair shard (`pairs/pair<N>.js`).
pub fn is_shard_name(name: &str) -> bool {
    let file = name.rsplit('/').next().unwrap_or(name);
    file.strip_prefix("pair")
        .and_then(|rest| rest.strip_suffix(".js"))
        .is_some_and(|number| !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()))
}

/// Reads book files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryShardSource {
    root: PathBuf,
}

impl DirectoryShardSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DirectoryShardSource {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` under the root, refusing paths that escape it.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(HelpdexError::shard_failure(
                name,
                "file name must be relative to the book directory",
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ShardSource for DirectoryShardSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        debug!("reading {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|e| HelpdexError::shard_failure(name, e.to_string()))
    }

    async fn list_shards(&self) -> Result<Vec<String>> {
        let dir = self.root.join(PAIRS_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(file) = entry.file_name().to_str() {
                let name = format!("{PAIRS_DIR}/{file}");
                if is_shard_name(&name) {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Serves book files from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryShardSource {
    files: AHashMap<String, Vec<u8>>,
}

impl MemoryShardSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert<N: Into<String>, B: Into<Vec<u8>>>(&mut self, name: N, bytes: B) {
        self.files.insert(name.into(), bytes.into());
    }

    /// Builder form of [`MemoryShardSource::insert`].
    pub fn with_file<N: Into<String>, B: Into<Vec<u8>>>(mut self, name: N, bytes: B) -> Self {
        self.insert(name, bytes);
        self
    }
}

#[async_trait]
impl ShardSource for MemoryShardSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| HelpdexError::shard_failure(name, "no such file"))
    }

    async fn list_shards(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .files
            .keys()
            .filter(|name| is_shard_name(name))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }
}
