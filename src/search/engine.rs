//! Query engine.
//!
//! A [`QueryEngine`] answers one query against a borrowed [`BookRegistry`].
//! It moves through a fixed sequence of states, one per [`QueryEngine::step`]:
//!
//! ```text
//! Parsed -> Expanded -> Ranked -> Merged -> Done
//! ```
//!
//! - **Expanded**: every term is resolved against every book in scope.
//! - **Ranked**: term scores are summed per book; books scoring zero drop out.
//! - **Merged**: books are ordered by descending score, ties by registration
//!   order, and truncated to `max_results`.
//! - **Done**: each ranked book becomes a [`SearchHit`] with its navigation
//!   entry.
//!
//! The engine does no I/O and never fails. Dropping it before `Done`
//! abandons the query.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::book::book::Book;
use crate::book::registry::BookRegistry;
use crate::index::association::{AssociationIndex, Weight};
use crate::locator::Locator;
use crate::search::config::SearchConfig;
use crate::search::parser::{ParsedQuery, QueryTerm, parse_query};
use crate::search::scope::SearchScope;
use crate::word::Word;

/// Score of a phrase whose every adjacent pair is associated.
///
/// Strictly greater than any single pair weight, so a matched phrase
/// outranks any amount of single-word association evidence for one term.
pub const PHRASE_MATCH_WEIGHT: u64 = Weight::MAX as u64 + 1;

/// Where a query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryState {
    Parsed,
    Expanded,
    Ranked,
    Merged,
    Done,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryState::Parsed => "parsed",
            QueryState::Expanded => "expanded",
            QueryState::Ranked => "ranked",
            QueryState::Merged => "merged",
            QueryState::Done => "done",
        };
        f.write_str(name)
    }
}

/// One book matching a query.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub book: Arc<Book>,
    pub score: u64,
    /// Index words that contributed to the score, sorted.
    pub matched_words: Vec<Word>,
    /// Where to navigate for this hit, if a TOC entry mentions a matched word.
    pub entry: Option<Locator>,
}

impl SearchHit {
    pub fn book_id(&self) -> &str {
        self.book.id()
    }
}

/// Score of one term within one book.
#[derive(Debug, Clone, Default)]
struct TermScore {
    score: u64,
    matched: Vec<Word>,
}

/// A book in scope together with its per-term scores.
#[derive(Debug)]
struct BookTerms {
    position: usize,
    book: Arc<Book>,
    terms: Vec<TermScore>,
}

/// A book with its summed score.
#[derive(Debug)]
struct RankedBook {
    position: usize,
    book: Arc<Book>,
    score: u64,
    matched: BTreeSet<Word>,
}

#[derive(Debug)]
enum Stage {
    Parsed,
    Expanded(Vec<BookTerms>),
    Ranked(Vec<RankedBook>),
    Merged(Vec<RankedBook>),
    Done(Vec<SearchHit>),
}

/// Runs one query over a registry.
#[derive(Debug)]
pub struct QueryEngine<'r> {
    registry: &'r BookRegistry,
    query: ParsedQuery,
    config: SearchConfig,
    scope: SearchScope,
    stage: Stage,
}

impl<'r> QueryEngine<'r> {
    /// Parse `query` and prepare to run it over `registry`.
    pub fn new(registry: &'r BookRegistry, query: &str) -> Self {
        QueryEngine {
            registry,
            query: parse_query(query),
            config: SearchConfig::default(),
            scope: SearchScope::All,
            stage: Stage::Parsed,
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn query(&self) -> &ParsedQuery {
        &self.query
    }

    pub fn state(&self) -> QueryState {
        match self.stage {
            Stage::Parsed => QueryState::Parsed,
            Stage::Expanded(_) => QueryState::Expanded,
            Stage::Ranked(_) => QueryState::Ranked,
            Stage::Merged(_) => QueryState::Merged,
            Stage::Done(_) => QueryState::Done,
        }
    }

    /// Advance one state. Stepping a finished engine does nothing.
    pub fn step(&mut self) -> QueryState {
        let stage = std::mem::replace(&mut self.stage, Stage::Parsed);
        self.stage = match stage {
            Stage::Parsed => Stage::Expanded(self.expand()),
            Stage::Expanded(books) => Stage::Ranked(rank(books)),
            Stage::Ranked(books) => Stage::Merged(self.merge(books)),
            Stage::Merged(books) => Stage::Done(finish(books)),
            done @ Stage::Done(_) => done,
        };
        debug!("query {:?} -> {}", self.query.raw(), self.state());
        self.state()
    }

    /// Drive the query to completion and return its hits.
    pub fn run(&mut self) -> &[SearchHit] {
        while self.state() != QueryState::Done {
            self.step();
        }
        self.results().unwrap_or_default()
    }

    /// Hits of a finished query, `None` before `Done`.
    pub fn results(&self) -> Option<&[SearchHit]> {
        match &self.stage {
            Stage::Done(hits) => Some(hits),
            _ => None,
        }
    }

    /// Run to completion and take the hits.
    pub fn into_results(mut self) -> Vec<SearchHit> {
        self.run();
        match self.stage {
            Stage::Done(hits) => hits,
            _ => Vec::new(),
        }
    }

    fn expand(&self) -> Vec<BookTerms> {
        self.registry
            .all()
            .enumerate()
            .filter(|(_, book)| self.scope.includes(book.id()))
            .map(|(position, book)| BookTerms {
                position,
                book: Arc::clone(book),
                terms: self
                    .query
                    .terms()
                    .iter()
                    .map(|term| self.score_term(book.index(), term))
                    .collect(),
            })
            .collect()
    }

    fn score_term(&self, index: &AssociationIndex, term: &QueryTerm) -> TermScore {
        match term {
            QueryTerm::Plain(word) => self.score_word(index, word),
            QueryTerm::Prefix(stem) => self.score_keys(index, index.expand_prefix(stem)),
            QueryTerm::Pattern(pattern) => match index.expand_pattern(pattern) {
                Ok(keys) => self.score_keys(index, keys),
                Err(e) => {
                    debug!("ignoring pattern {pattern}: {e}");
                    TermScore::default()
                }
            },
            QueryTerm::Phrase(words) => score_phrase(index, words),
        }
    }

    fn score_word(&self, index: &AssociationIndex, word: &Word) -> TermScore {
        let score: u64 = index
            .expand(word, self.config.max_expansions)
            .iter()
            .map(|(_, weight)| u64::from(*weight))
            .sum();

        TermScore {
            score,
            matched: if score > 0 { vec![word.clone()] } else { Vec::new() },
        }
    }

    fn score_keys(&self, index: &AssociationIndex, keys: Vec<Word>) -> TermScore {
        let mut total = TermScore::default();
        for key in keys.into_iter().take(self.config.max_wildcard_matches) {
            let TermScore { score, matched } = self.score_word(index, &key);
            total.score = total.score.saturating_add(score);
            total.matched.extend(matched);
        }
        total
    }

    fn merge(&self, mut books: Vec<RankedBook>) -> Vec<RankedBook> {
        // Stable sort on the registration order keeps ties in that order.
        books.sort_by_key(|book| book.position);
        books.sort_by(|a, b| b.score.cmp(&a.score));
        if self.config.max_results > 0 {
            books.truncate(self.config.max_results);
        }
        books
    }
}

fn score_phrase(index: &AssociationIndex, words: &[Word]) -> TermScore {
    let matched = match words {
        [] => false,
        [word] => index.contains_key(word),
        _ => words
            .windows(2)
            .all(|pair| index.contains_pair(&pair[0], &pair[1])),
    };

    if matched {
        TermScore {
            score: PHRASE_MATCH_WEIGHT,
            matched: words.to_vec(),
        }
    } else {
        TermScore::default()
    }
}

fn rank(books: Vec<BookTerms>) -> Vec<RankedBook> {
    books
        .into_iter()
        .filter_map(|BookTerms { position, book, terms }| {
            let score = terms
                .iter()
                .fold(0u64, |acc, term| acc.saturating_add(term.score));
            if score == 0 {
                return None;
            }
            let matched = terms.into_iter().flat_map(|term| term.matched).collect();
            Some(RankedBook {
                position,
                book,
                score,
                matched,
            })
        })
        .collect()
}

fn finish(books: Vec<RankedBook>) -> Vec<SearchHit> {
    books
        .into_iter()
        .map(|ranked| {
            let entry = ranked.book.locate(ranked.matched.iter());
            SearchHit {
                book: ranked.book,
                score: ranked.score,
                matched_words: ranked.matched.into_iter().collect(),
                entry,
            }
        })
        .collect()
}

/// Run `query` over `registry` with `config`, searching every book.
pub fn search(registry: &BookRegistry, query: &str, config: &SearchConfig) -> Vec<SearchHit> {
    QueryEngine::new(registry, query)
        .with_config(config.clone())
        .into_results()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::pairs::PairEntry;
    use crate::toc::tree::TocTree;

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn index(pairs: &[(&str, &str)]) -> AssociationIndex {
        AssociationIndex::merge(pairs.iter().map(|(a, b)| PairEntry::new(a, b).unwrap()))
    }

    fn book(id: &str, pairs: &[(&str, &str)]) -> Book {
        let mut toc = TocTree::create_root(id);
        let root = toc.root();
        toc.append(
            root,
            "ICMP Error Messages",
            Locator::parse("icmp.html#errors").unwrap(),
        )
        .unwrap();
        Book::new(id, format!("Book {id}"), toc, index(pairs))
    }

    fn registry(books: Vec<Book>) -> BookRegistry {
        let mut registry = BookRegistry::new();
        for book in books {
            registry.register(book).unwrap();
        }
        registry
    }

    #[test]
    fn test_states_advance_in_order() {
        let registry = registry(vec![book("a", &[("mac", "layer")])]);
        let mut engine = QueryEngine::new(&registry, "mac");

        assert_eq!(engine.state(), QueryState::Parsed);
        assert!(engine.results().is_none());
        assert_eq!(engine.step(), QueryState::Expanded);
        assert_eq!(engine.step(), QueryState::Ranked);
        assert_eq!(engine.step(), QueryState::Merged);
        assert_eq!(engine.step(), QueryState::Done);
        assert_eq!(engine.step(), QueryState::Done);
        assert_eq!(engine.results().unwrap().len(), 1);
    }

    #[test]
    fn test_more_evidence_ranks_higher() {
        let registry = registry(vec![
            book("a", &[("icmp", "error")]),
            book("b", &[("icmp", "error"), ("icmp", "error"), ("icmp", "message")]),
        ]);

        let hits = search(&registry, "icmp error", &SearchConfig::default());
        let ids: Vec<_> = hits.iter().map(SearchHit::book_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(hits[0].score, 3);
        assert_eq!(hits[1].score, 1);
        assert_eq!(hits[0].matched_words, vec![w("icmp")]);
        assert_eq!(
            hits[0].entry.as_ref().unwrap().to_string(),
            "icmp.html#errors"
        );
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let registry = registry(vec![
            book("second", &[("mac", "layer")]),
            book("first", &[("mac", "layer")]),
        ]);

        let hits = search(&registry, "mac", &SearchConfig::default());
        let ids: Vec<_> = hits.iter().map(SearchHit::book_id).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn test_unknown_words_match_nothing() {
        let registry = registry(vec![book("a", &[("mac", "layer")])]);
        assert!(search(&registry, "zzz", &SearchConfig::default()).is_empty());
        assert!(search(&registry, "", &SearchConfig::default()).is_empty());
        assert!(search(&registry, "*", &SearchConfig::default()).is_empty());
    }

    #[test]
    fn test_phrase_outranks_pair_weights() {
        let mut heavy = Vec::new();
        for _ in 0..50 {
            heavy.push(("mac", "layer"));
        }
        let registry = registry(vec![
            book("heavy", &heavy),
            book("phrase", &[("802.11", "mac")]),
        ]);

        let hits = search(&registry, "\"802.11 mac\"", &SearchConfig::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book_id(), "phrase");
        assert_eq!(hits[0].score, PHRASE_MATCH_WEIGHT);
        assert_eq!(hits[0].matched_words, vec![w("802.11"), w("mac")]);
    }

    #[test]
    fn test_phrase_requires_every_adjacent_pair() {
        let registry = registry(vec![book("a", &[("ieee", "802.11"), ("802.11", "mac")])]);
        let config = SearchConfig::default();

        assert_eq!(search(&registry, "\"ieee 802.11 mac\"", &config).len(), 1);
        assert!(search(&registry, "\"ieee mac\"", &config).is_empty());
        assert!(search(&registry, "\"mac 802.11\"", &config).is_empty());
        assert_eq!(search(&registry, "\"ieee\"", &config).len(), 1);
        assert!(search(&registry, "\"mac\"", &config).is_empty());
    }

    #[test]
    fn test_prefix_and_pattern_terms() {
        let registry = registry(vec![book(
            "a",
            &[
                ("802.11", "wireless"),
                ("802.3", "ethernet"),
                ("queue", "fifo"),
                ("subqueue", "drop"),
            ],
        )]);
        let config = SearchConfig::default();

        let hits = search(&registry, "802.*", &config);
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[0].matched_words, vec![w("802.11"), w("802.3")]);

        let hits = search(&registry, "*queue", &config);
        assert_eq!(hits[0].matched_words, vec![w("queue"), w("subqueue")]);

        let hits = search(&registry, "802.?", &config);
        assert_eq!(hits[0].matched_words, vec![w("802.3")]);
    }

    #[test]
    fn test_wildcard_matches_are_capped() {
        let registry = registry(vec![book("a", &[("aa", "x"), ("ab", "x"), ("ac", "x")])]);
        let config = SearchConfig {
            max_wildcard_matches: 2,
            ..SearchConfig::default()
        };

        let hits = search(&registry, "a*", &config);
        assert_eq!(hits[0].matched_words, vec![w("aa"), w("ab")]);
    }

    #[test]
    fn test_scope_and_max_results() {
        let registry = registry(vec![
            book("a", &[("mac", "layer")]),
            book("b", &[("mac", "layer"), ("mac", "layer")]),
            book("c", &[("mac", "layer")]),
        ]);

        let hits = QueryEngine::new(&registry, "mac")
            .with_scope(SearchScope::books(["a", "c", "missing"]))
            .into_results();
        let ids: Vec<_> = hits.iter().map(SearchHit::book_id).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let hits = search(&registry, "mac", &SearchConfig::default().with_max_results(2));
        let ids: Vec<_> = hits.iter().map(SearchHit::book_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_dropping_engine_midway_leaves_registry_usable() {
        let registry = registry(vec![book("a", &[("mac", "layer")])]);
        {
            let mut engine = QueryEngine::new(&registry, "mac");
            engine.step();
            engine.step();
        }
        assert_eq!(search(&registry, "mac", &SearchConfig::default()).len(), 1);
    }
}
