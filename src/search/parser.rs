//! Query string parsing.
//!
//! Supported syntax:
//! - Plain words: `icmp error`
//! - Phrases: `"802.11 mac"`, every adjacent pair must be associated
//! - Prefixes: `802.*`
//! - Wildcard patterns: `*queue*`, `802.?`
//!
//! Words are separated by whitespace or commas and normalized like index
//! words. Parsing never fails: tokens that do not normalize to a word are
//! dropped, and an unterminated quote runs to the end of the input.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::word::Word;

/// Wildcard matching any run of characters.
pub const WILDCARD_ANY: char = '*';

/// Wildcard matching exactly one character.
pub const WILDCARD_ONE: char = '?';

/// One term of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTerm {
    /// Resolved through the word's related words.
    Plain(Word),
    /// Every index key starting with the stem (`802.*` → `802.`).
    Prefix(Word),
    /// Every index key matching a wildcard pattern.
    Pattern(Word),
    /// Adjacent words that must all be associated, in order.
    Phrase(Vec<Word>),
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTerm::Plain(word) | QueryTerm::Pattern(word) => write!(f, "{word}"),
            QueryTerm::Prefix(stem) => write!(f, "{stem}{WILDCARD_ANY}"),
            QueryTerm::Phrase(words) => {
                let joined: Vec<&str> = words.iter().map(Word::as_str).collect();
                write!(f, "\"{}\"", joined.join(" "))
            }
        }
    }
}

/// A tokenized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    raw: String,
    terms: Vec<QueryTerm>,
}

impl ParsedQuery {
    /// The query as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[QueryTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Parse a query string into terms.
pub fn parse_query(input: &str) -> ParsedQuery {
    let mut parser = QueryStringParser::new(input);
    ParsedQuery {
        raw: input.to_string(),
        terms: parser.parse(),
    }
}

/// Internal parser over the query characters.
struct QueryStringParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> QueryStringParser<'a> {
    fn new(input: &'a str) -> Self {
        QueryStringParser {
            chars: input.chars().peekable(),
        }
    }

    fn parse(&mut self) -> Vec<QueryTerm> {
        let mut terms = Vec::new();

        loop {
            self.skip_separators();
            match self.chars.peek() {
                None => break,
                Some('"') => {
                    self.chars.next();
                    if let Some(term) = self.parse_phrase() {
                        terms.push(term);
                    }
                }
                Some(_) => {
                    let token = self.consume_token();
                    if let Some(term) = classify(&token) {
                        terms.push(term);
                    }
                }
            }
        }

        terms
    }

    fn parse_phrase(&mut self) -> Option<QueryTerm> {
        let mut phrase = String::new();
        for ch in self.chars.by_ref() {
            if ch == '"' {
                break;
            }
            phrase.push(ch);
        }

        let words: Vec<Word> = phrase
            .split(is_separator)
            .filter_map(|token| Word::new(token).ok())
            .collect();

        if words.is_empty() {
            None
        } else {
            Some(QueryTerm::Phrase(words))
        }
    }

    fn consume_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(&ch) = self.chars.peek() {
            if is_separator(ch) || ch == '"' {
                break;
            }
            token.push(ch);
            self.chars.next();
        }
        token
    }

    fn skip_separators(&mut self) {
        while self.chars.next_if(|&ch| is_separator(ch)).is_some() {}
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

fn classify(token: &str) -> Option<QueryTerm> {
    if token.chars().all(|c| c == WILDCARD_ANY) {
        return None;
    }

    let word = Word::new(token).ok()?;
    let is_wildcard = |c: char| c == WILDCARD_ANY || c == WILDCARD_ONE;

    if let Some(stem) = token.strip_suffix(WILDCARD_ANY)
        && !stem.contains(is_wildcard)
    {
        return Word::new(stem).ok().map(QueryTerm::Prefix);
    }

    if token.contains(is_wildcard) {
        Some(QueryTerm::Pattern(word))
    } else {
        Some(QueryTerm::Plain(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn test_plain_terms() {
        let query = parse_query("ICMP  error");
        assert_eq!(
            query.terms(),
            &[QueryTerm::Plain(w("icmp")), QueryTerm::Plain(w("error"))]
        );
        assert_eq!(query.raw(), "ICMP  error");
    }

    #[test]
    fn test_phrase() {
        let query = parse_query("\"802.11 MAC\" layer");
        assert_eq!(
            query.terms(),
            &[
                QueryTerm::Phrase(vec![w("802.11"), w("mac")]),
                QueryTerm::Plain(w("layer")),
            ]
        );
    }

    #[test]
    fn test_unterminated_phrase_runs_to_end() {
        let query = parse_query("mac \"link layer");
        assert_eq!(
            query.terms(),
            &[
                QueryTerm::Plain(w("mac")),
                QueryTerm::Phrase(vec![w("link"), w("layer")]),
            ]
        );
    }

    #[test]
    fn test_prefix_and_pattern() {
        let query = parse_query("802.* *queue* 802.? mac*");
        assert_eq!(
            query.terms(),
            &[
                QueryTerm::Prefix(w("802.")),
                QueryTerm::Pattern(w("*queue*")),
                QueryTerm::Pattern(w("802.?")),
                QueryTerm::Prefix(w("mac")),
            ]
        );
    }

    #[test]
    fn test_degenerate_tokens_are_dropped() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   ").is_empty());
        assert!(parse_query("* **").is_empty());
        assert!(parse_query("\"\"").is_empty());
        assert!(parse_query("\"  \"").is_empty());
    }

    #[test]
    fn test_commas_separate_words() {
        let query = parse_query("mac,layer");
        assert_eq!(
            query.terms(),
            &[QueryTerm::Plain(w("mac")), QueryTerm::Plain(w("layer"))]
        );
    }

    #[test]
    fn test_display() {
        let query = parse_query("\"a b\" c* d?");
        let shown: Vec<String> = query.terms().iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, vec!["\"a b\"", "c*", "d?"]);
    }
}
