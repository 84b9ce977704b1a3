//! Error types for storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store rejected or failed the call.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The store or iterator is closed.
    #[error("store is closed")]
    Closed,

    /// A range scan was requested with `start` after `end`.
    #[error("invalid scan range: start {start:?} is after end {end:?}")]
    InvalidRange {
        /// The requested inclusive start key.
        start: String,
        /// The requested exclusive end key.
        end: String,
    },

    /// `next_entry` was called on an iterator with no entries left.
    #[error("iterator exhausted")]
    IteratorExhausted,
}

impl StorageError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
