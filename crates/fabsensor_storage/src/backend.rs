//! Store and iterator trait definitions.

use crate::error::StorageResult;

/// A single `(key, value)` pair yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    /// The store key.
    pub key: String,
    /// The raw value bytes stored under `key`.
    pub value: Vec<u8>,
}

impl KvEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// An ordered key-value store.
///
/// Stores are **opaque byte maps**. They provide point reads, point writes
/// and range scans. fabsensor owns all value interpretation - stores do not
/// understand records.
///
/// # Invariants
///
/// - `put` is an unconditional upsert
/// - `get` distinguishes an absent key (`None`) from an empty value
/// - `scan_range` yields keys in the store's native order
/// - `compare_and_put` is atomic with respect to every other write on the key
/// - Stores must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing and ephemeral use
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key has no value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Writes `value` under `key` only if the current value equals `expected`.
    ///
    /// `expected = None` means the key must currently be absent. Returns
    /// `Ok(false)` without writing when the current value differs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read or write fails.
    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StorageResult<bool>;

    /// Opens an iterator over keys in `[start, end)`.
    ///
    /// An empty `start` means "from the first key"; an empty `end` means
    /// "through the last key". Passing two empty bounds scans the whole store.
    ///
    /// The returned iterator holds a store-side resource until
    /// [`KvIterator::close`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be started or the bounds are
    /// inverted.
    fn scan_range(&self, start: &str, end: &str) -> StorageResult<Box<dyn KvIterator + '_>>;
}

/// A cursor over the result of [`KvStore::scan_range`].
pub trait KvIterator {
    /// Returns true if another entry can be read.
    fn has_next(&self) -> bool;

    /// Reads the next entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails mid-scan or the
    /// iterator is exhausted or closed.
    fn next_entry(&mut self) -> StorageResult<KvEntry>;

    /// Releases the store-side resource held by this iterator.
    ///
    /// # Errors
    ///
    /// Returns an error if the release fails.
    fn close(&mut self) -> StorageResult<()>;
}
