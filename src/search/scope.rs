//! Which books a query looks at.

use serde::{Deserialize, Serialize};

use crate::book::book::BookId;

/// Restricts a query to part of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Every registered book.
    #[default]
    All,
    /// Only the listed books. Ids that are not registered are ignored.
    Books(Vec<BookId>),
}

impl SearchScope {
    /// Scope covering the given book ids.
    pub fn books<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BookId>,
    {
        SearchScope::Books(ids.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, id: &str) -> bool {
        match self {
            SearchScope::All => true,
            SearchScope::Books(ids) => ids.iter().any(|candidate| candidate == id),
        }
    }
}
