//! Merged word-association index of one book.
//!
//! The index maps every source word to the words seen near it, together with
//! a weight: the number of shard entries that asserted the pair. Weights only
//! ever grow as shards are merged in, so adding shards can add related words
//! or raise their weights but never remove or lower anything.
//!
//! Merging is a plain reducer over [`PairEntry`] values. It is commutative
//! and associative, which lets shards be loaded concurrently and merged in
//! whatever order they complete.

use std::collections::BTreeMap;
use std::ops::Bound;

use regex::Regex;

use crate::error::{HelpdexError, Result};
use crate::index::pairs::PairEntry;
use crate::word::Word;

/// Occurrence count of one `(source, related)` pair.
pub type Weight = u32;

/// Word → related words with weights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationIndex {
    /// Ordered so prefix scans and key listings are deterministic.
    entries: BTreeMap<Word, BTreeMap<Word, Weight>>,
}

impl AssociationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a sequence of entries.
    pub fn merge<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PairEntry>,
    {
        let mut index = AssociationIndex::new();
        index.merge_into(entries);
        index
    }

    /// Add entries to this index, counting repeated pairs.
    pub fn merge_into<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = PairEntry>,
    {
        for entry in entries {
            let weight = self
                .entries
                .entry(entry.source)
                .or_default()
                .entry(entry.related)
                .or_insert(0);
            *weight = weight.saturating_add(1);
        }
    }

    /// Fold another index into this one, summing weights pair by pair.
    pub fn absorb(&mut self, other: AssociationIndex) {
        for (source, related) in other.entries {
            let target = self.entries.entry(source).or_default();
            for (word, weight) in related {
                let slot = target.entry(word).or_insert(0);
                *slot = slot.saturating_add(weight);
            }
        }
    }

    /// Related words of `word`, heaviest first.
    ///
    /// Ties are broken by the related word in lexicographic order. An unknown
    /// word yields an empty vector.
    pub fn expand(&self, word: &Word, max_results: usize) -> Vec<(Word, Weight)> {
        let Some(related) = self.entries.get(word) else {
            return Vec::new();
        };

        let mut candidates: Vec<(&Word, Weight)> =
            related.iter().map(|(w, &weight)| (w, weight)).collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        candidates
            .into_iter()
            .take(max_results)
            .map(|(w, weight)| (w.clone(), weight))
            .collect()
    }

    /// Keys starting with `prefix`, in lexicographic order.
    pub fn expand_prefix(&self, prefix: &Word) -> Vec<Word> {
        self.keys_from(prefix.as_str())
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Keys matching a wildcard pattern, in lexicographic order.
    ///
    /// `*` matches any run of characters and `?` exactly one. The pattern is
    /// matched against the whole key.
    pub fn expand_pattern(&self, pattern: &Word) -> Result<Vec<Word>> {
        let regex = compile_wildcard(pattern.as_str())?;
        let literal_prefix: String = pattern
            .as_str()
            .chars()
            .take_while(|c| *c != '*' && *c != '?')
            .collect();

        Ok(self
            .keys_from(&literal_prefix)
            .take_while(|key| key.as_str().starts_with(&literal_prefix))
            .filter(|key| regex.is_match(key.as_str()))
            .cloned()
            .collect())
    }

    /// Whether `related` has been seen near `source`.
    pub fn contains_pair(&self, source: &Word, related: &Word) -> bool {
        self.weight(source, related) > 0
    }

    /// Weight of the `(source, related)` pair, zero if absent.
    pub fn weight(&self, source: &Word, related: &Word) -> Weight {
        self.entries
            .get(source)
            .and_then(|words| words.get(related))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the weights of every related word of `word`.
    pub fn total_weight(&self, word: &Word) -> u64 {
        self.entries
            .get(word)
            .map(|words| words.values().map(|&w| u64::from(w)).sum())
            .unwrap_or(0)
    }

    pub fn contains_key(&self, word: &Word) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of related words of `word`.
    pub fn related_count(&self, word: &Word) -> usize {
        self.entries.get(word).map_or(0, BTreeMap::len)
    }

    /// Number of source words.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct `(source, related)` pairs.
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source words in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &Word> + '_ {
        self.entries.keys()
    }

    fn keys_from<'a>(&'a self, start: &'a str) -> impl Iterator<Item = &'a Word> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(start), Bound::Unbounded))
            .map(|(key, _)| key)
    }
}

/// Compile a wildcard pattern into an anchored regex.
fn compile_wildcard(pattern: &str) -> Result<Regex> {
    let mut regex_pattern = String::with_capacity(pattern.len() + 8);
    regex_pattern.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex_pattern.push_str(".*"),
            '?' => regex_pattern.push('.'),
            c => regex_pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    regex_pattern.push('$');

    Regex::new(&regex_pattern)
        .map_err(|e| HelpdexError::other(format!("Invalid wildcard pattern {pattern:?}: {e}")))
}
