//! Error types for the helpdex library.
//!
//! All fallible operations return [`HelpdexError`] through the [`Result`]
//! alias. The variants follow the failure taxonomy of the help viewer:
//!
//! - [`HelpdexError::MalformedEntry`] and [`HelpdexError::ShardLoadFailure`]
//!   describe bad input data. Loaders absorb them locally (the entry or shard
//!   is skipped and reported) so a book still loads with partial coverage.
//! - [`HelpdexError::InvalidParent`] and [`HelpdexError::DuplicateBookId`]
//!   describe caller mistakes and abort the operation that caused them.
//!
//! An unknown query word is never an error; it yields empty results.
//!
//! # Examples
//!
//! ```
//! use helpdex::error::{HelpdexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HelpdexError::duplicate_book("developer"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for helpdex operations.
#[derive(Error, Debug)]
pub enum HelpdexError {
    /// A pair-table entry that cannot be turned into a word pair.
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    /// One shard could not be fetched or decoded.
    #[error("Shard load failure for '{shard}': {reason}")]
    ShardLoadFailure { shard: String, reason: String },

    /// A TOC handle that does not belong to the tree under construction.
    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    /// A book id that is already registered.
    #[error("Duplicate book id: {0}")]
    DuplicateBookId(String),

    /// A locator string that cannot be parsed.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HelpdexError.
pub type Result<T> = std::result::Result<T, HelpdexError>;

impl HelpdexError {
    /// Create a new malformed entry error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        HelpdexError::MalformedEntry(msg.into())
    }

    /// Create a new shard load failure.
    pub fn shard_failure<S: Into<String>, R: Into<String>>(shard: S, reason: R) -> Self {
        HelpdexError::ShardLoadFailure {
            shard: shard.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid parent error.
    pub fn invalid_parent<S: Into<String>>(msg: S) -> Self {
        HelpdexError::InvalidParent(msg.into())
    }

    /// Create a new duplicate book id error.
    pub fn duplicate_book<S: Into<String>>(id: S) -> Self {
        HelpdexError::DuplicateBookId(id.into())
    }

    /// Create a new invalid locator error.
    pub fn invalid_locator<S: Into<String>>(msg: S) -> Self {
        HelpdexError::InvalidLocator(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HelpdexError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HelpdexError::Other(msg.into())
    }

    /// Whether this error describes bad input data rather than a caller mistake.
    ///
    /// Data errors are absorbed by loaders; structural errors are surfaced.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            HelpdexError::MalformedEntry(_) | HelpdexError::ShardLoadFailure { .. }
        )
    }
}
