//! Configuration for query execution.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdexError, Result};

/// Tuning knobs for the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum related words considered per resolved word.
    pub max_expansions: usize,

    /// Maximum index keys a prefix or pattern term may resolve to.
    pub max_wildcard_matches: usize,

    /// Maximum number of books returned. Zero means unlimited.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_expansions: 25,
            max_wildcard_matches: 100,
            max_results: 0,
        }
    }
}

impl SearchConfig {
    /// Set the per-word expansion limit.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Set the cap on books returned.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_expansions == 0 {
            return Err(HelpdexError::invalid_config(
                "max_expansions must be greater than 0",
            ));
        }

        if self.max_wildcard_matches == 0 {
            return Err(HelpdexError::invalid_config(
                "max_wildcard_matches must be greater than 0",
            ));
        }

        Ok(())
    }
}
