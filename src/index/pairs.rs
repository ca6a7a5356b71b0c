//! Pair entries and the per-shard loader.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};
use crate::word::Word;

/// A directional association: `related` occurs near `source` on some page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairEntry {
    pub source: Word,
    pub related: Word,
}

impl PairEntry {
    /// Normalize both sides of a raw pair.
    ///
    /// Fails with [`HelpdexError::MalformedEntry`] if either side is unusable.
    pub fn new(source: &str, related: &str) -> Result<Self> {
        let source = Word::new(source).map_err(|e| {
            HelpdexError::malformed(format!("source of ({source:?}, {related:?}): {}", reason(e)))
        })?;
        let related = Word::new(related).map_err(|e| {
            HelpdexError::malformed(format!("related of ({source}, {related:?}): {}", reason(e)))
        })?;
        Ok(PairEntry { source, related })
    }
}

/// The bare reason carried by a word normalization error.
fn reason(error: HelpdexError) -> String {
    match error {
        HelpdexError::MalformedEntry(reason) => reason,
        other => other.to_string(),
    }
}

/// Result of loading one shard.
#[derive(Debug, Default)]
pub struct LoadedShard {
    /// Entries that normalized cleanly, in input order.
    pub entries: Vec<PairEntry>,
    /// Why each rejected entry was skipped.
    pub malformed: Vec<HelpdexError>,
}

impl LoadedShard {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

/// Turns raw generator pairs into [`PairEntry`] values.
///
/// Loading is a pure transform. It does not deduplicate or sort; the
/// association index merge takes care of both.
#[derive(Debug, Default, Clone, Copy)]
pub struct PairShardLoader;

impl PairShardLoader {
    pub fn new() -> Self {
        PairShardLoader
    }

    /// Normalize every raw pair, skipping the malformed ones.
    pub fn load<I, S, R>(&self, raw_entries: I) -> LoadedShard
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let mut shard = LoadedShard::default();
        for (source, related) in raw_entries {
            match PairEntry::new(source.as_ref(), related.as_ref()) {
                Ok(entry) => shard.entries.push(entry),
                Err(e) => shard.malformed.push(e),
            }
        }
        shard
    }
}
