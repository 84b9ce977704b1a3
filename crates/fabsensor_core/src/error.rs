//! Error types for record operations.

use fabsensor_codec::CodecError;
use fabsensor_storage::StorageError;
use thiserror::Error;

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that can occur in record operations.
///
/// None of these are retried internally.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A point read or range scan against the store failed.
    #[error("failed to read {target} from store: {source}")]
    StoreRead {
        /// The key or range being read.
        target: String,
        /// The store error.
        #[source]
        source: StorageError,
    },

    /// A write against the store failed.
    #[error("failed to write key {key:?} to store: {source}")]
    StoreWrite {
        /// The key being written.
        key: String,
        /// The store error.
        #[source]
        source: StorageError,
    },

    /// The store holds no value under the key.
    #[error("record {key:?} does not exist")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A stored payload could not be decoded (strict decode mode only).
    #[error("record {key:?} could not be decoded: {source}")]
    Decode {
        /// The key whose value failed to decode.
        key: String,
        /// The codec error.
        #[source]
        source: CodecError,
    },

    /// A record could not be encoded.
    #[error("codec error: {0}")]
    Encode(#[from] CodecError),

    /// The key kept changing during a read-modify-write.
    #[error("record {key:?} changed concurrently; gave up after {attempts} attempts")]
    UpdateConflict {
        /// The key being updated.
        key: String,
        /// How many attempts were made.
        attempts: u32,
    },
}

impl RecordError {
    /// Creates a store read error for a point key.
    pub fn read(key: &str, source: StorageError) -> Self {
        Self::StoreRead {
            target: format!("key {key:?}"),
            source,
        }
    }

    /// Creates a store read error for a range scan.
    pub fn scan(start: &str, end: &str, source: StorageError) -> Self {
        Self::StoreRead {
            target: format!("range [{start:?}, {end:?})"),
            source,
        }
    }

    /// Creates a store write error.
    pub fn write(key: &str, source: StorageError) -> Self {
        Self::StoreWrite {
            key: key.to_string(),
            source,
        }
    }

    /// Creates a not found error.
    pub fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Returns true if this is a [`RecordError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
