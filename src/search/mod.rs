//! Query parsing and execution over a book registry.

pub mod config;
pub mod engine;
pub mod parser;
pub mod scope;

pub use self::config::SearchConfig;
pub use self::engine::{PHRASE_MATCH_WEIGHT, QueryEngine, QueryState, SearchHit, search};
pub use self::parser::{ParsedQuery, QueryTerm, parse_query};
pub use self::scope::SearchScope;
