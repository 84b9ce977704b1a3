//! In-memory ordered store for testing.

use crate::backend::{KvEntry, KvIterator, KvStore};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An in-memory ordered key-value store.
///
/// Keys are kept in a `BTreeMap`, so scans return them in lexicographic
/// byte order. This store is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral record sets that don't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
/// `compare_and_put` runs under the write lock, so it is atomic with
/// respect to every other write.
///
/// # Example
///
/// ```rust
/// use fabsensor_storage::{KvStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.put("b", b"2").unwrap();
/// store.put("a", b"1").unwrap();
///
/// let mut iter = store.scan_range("", "").unwrap();
/// assert_eq!(iter.next_entry().unwrap().key, "a");
/// assert_eq!(iter.next_entry().unwrap().key, "b");
/// iter.close().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    open_scans: AtomicUsize,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with pre-existing entries.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: Into<String>,
    {
        let data = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            data: RwLock::new(data),
            open_scans: AtomicUsize::new(0),
        }
    }

    /// Returns the number of keys in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Returns a copy of every entry in key order.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn entries(&self) -> Vec<KvEntry> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| KvEntry::new(k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of scan iterators that have not been closed yet.
    #[must_use]
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::Acquire)
    }

    /// Clears all entries from the store.
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

fn bound<'a>(key: &str, unbounded_if_empty: Bound<&'a str>) -> Bound<&'a str> {
    if key.is_empty() {
        Bound::Unbounded
    } else {
        unbounded_if_empty
    }
}

impl KvStore for InMemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StorageResult<bool> {
        let mut data = self.data.write();
        if data.get(key).map(Vec::as_slice) != expected {
            return Ok(false);
        }
        data.insert(key.to_string(), value.to_vec());
        Ok(true)
    }

    fn scan_range(&self, start: &str, end: &str) -> StorageResult<Box<dyn KvIterator + '_>> {
        if !start.is_empty() && !end.is_empty() && start > end {
            return Err(StorageError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let lower = bound(start, Bound::Included(start));
        let upper = bound(end, Bound::Excluded(end));

        let entries: Vec<KvEntry> = self
            .data
            .read()
            .range::<str, _>((lower, upper))
            .map(|(k, v)| KvEntry::new(k.clone(), v.clone()))
            .collect();

        self.open_scans.fetch_add(1, Ordering::AcqRel);
        tracing::trace!(start, end, count = entries.len(), "opened scan");

        Ok(Box::new(MemoryIterator {
            entries,
            position: 0,
            open_scans: Some(&self.open_scans),
        }))
    }
}

/// Iterator over a snapshot of an [`InMemoryStore`] range.
///
/// The snapshot is taken when the scan is opened; later writes to the
/// store are not visible through it.
#[derive(Debug)]
pub struct MemoryIterator<'a> {
    entries: Vec<KvEntry>,
    position: usize,
    open_scans: Option<&'a AtomicUsize>,
}

impl KvIterator for MemoryIterator<'_> {
    fn has_next(&self) -> bool {
        self.open_scans.is_some() && self.position < self.entries.len()
    }

    fn next_entry(&mut self) -> StorageResult<KvEntry> {
        if self.open_scans.is_none() {
            return Err(StorageError::Closed);
        }
        let entry = self
            .entries
            .get(self.position)
            .cloned()
            .ok_or(StorageError::IteratorExhausted)?;
        self.position += 1;
        Ok(entry)
    }

    fn close(&mut self) -> StorageResult<()> {
        match self.open_scans.take() {
            Some(counter) => {
                counter.fetch_sub(1, Ordering::AcqRel);
                Ok(())
            }
            None => Err(StorageError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_keys(iter: &mut dyn KvIterator) -> Vec<String> {
        let mut keys = Vec::new();
        while iter.has_next() {
            keys.push(iter.next_entry().unwrap().key);
        }
        keys
    }

    #[test]
    fn memory_new_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn memory_get_missing_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn memory_empty_value_is_not_absent() {
        let store = InMemoryStore::new();
        store.put("k", b"").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn memory_put_overwrites() {
        let store = InMemoryStore::new();
        store.put("k", b"first").unwrap();
        store.put("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"second"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_compare_and_put_matches() {
        let store = InMemoryStore::new();
        store.put("k", b"v1").unwrap();

        assert!(store.compare_and_put("k", Some(b"v1"), b"v2").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v2"[..]));
    }

    #[test]
    fn memory_compare_and_put_mismatch_leaves_value() {
        let store = InMemoryStore::new();
        store.put("k", b"v1").unwrap();

        assert!(!store.compare_and_put("k", Some(b"stale"), b"v2").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v1"[..]));
    }

    #[test]
    fn memory_compare_and_put_absent() {
        let store = InMemoryStore::new();
        assert!(store.compare_and_put("k", None, b"v").unwrap());
        assert!(!store.compare_and_put("k", None, b"again").unwrap());
    }

    #[test]
    fn memory_full_scan_is_ordered() {
        let store = InMemoryStore::new();
        for key in ["SENSOR2", "A", "SENSOR10", "SENSOR1"] {
            store.put(key, key.as_bytes()).unwrap();
        }

        let mut iter = store.scan_range("", "").unwrap();
        assert_eq!(
            collect_keys(iter.as_mut()),
            vec!["A", "SENSOR1", "SENSOR10", "SENSOR2"]
        );
        iter.close().unwrap();
    }

    #[test]
    fn memory_bounded_scan_is_half_open() {
        let store = InMemoryStore::with_entries((0..5).map(|i| (format!("k{i}"), vec![i])));

        let mut iter = store.scan_range("k1", "k3").unwrap();
        assert_eq!(collect_keys(iter.as_mut()), vec!["k1", "k2"]);
        iter.close().unwrap();

        let mut iter = store.scan_range("k3", "").unwrap();
        assert_eq!(collect_keys(iter.as_mut()), vec!["k3", "k4"]);
        iter.close().unwrap();

        let mut iter = store.scan_range("", "k1").unwrap();
        assert_eq!(collect_keys(iter.as_mut()), vec!["k0"]);
        iter.close().unwrap();
    }

    #[test]
    fn memory_inverted_range_fails() {
        let store = InMemoryStore::new();
        let result = store.scan_range("z", "a");
        assert!(matches!(result, Err(StorageError::InvalidRange { .. })));
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn memory_scan_tracks_open_resources() {
        let store = InMemoryStore::new();
        store.put("a", b"1").unwrap();

        let mut first = store.scan_range("", "").unwrap();
        let mut second = store.scan_range("", "").unwrap();
        assert_eq!(store.open_scans(), 2);

        first.close().unwrap();
        assert_eq!(store.open_scans(), 1);
        second.close().unwrap();
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn memory_double_close_fails() {
        let store = InMemoryStore::new();
        let mut iter = store.scan_range("", "").unwrap();
        iter.close().unwrap();
        assert_eq!(iter.close(), Err(StorageError::Closed));
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn memory_next_after_close_fails() {
        let store = InMemoryStore::new();
        store.put("a", b"1").unwrap();

        let mut iter = store.scan_range("", "").unwrap();
        iter.close().unwrap();
        assert!(!iter.has_next());
        assert_eq!(iter.next_entry(), Err(StorageError::Closed));
    }

    #[test]
    fn memory_next_past_end_fails() {
        let store = InMemoryStore::new();
        let mut iter = store.scan_range("", "").unwrap();
        assert!(!iter.has_next());
        assert_eq!(iter.next_entry(), Err(StorageError::IteratorExhausted));
        iter.close().unwrap();
    }

    #[test]
    fn memory_scan_is_a_snapshot() {
        let store = InMemoryStore::new();
        store.put("a", b"1").unwrap();

        let mut iter = store.scan_range("", "").unwrap();
        store.put("b", b"2").unwrap();

        assert_eq!(collect_keys(iter.as_mut()), vec!["a"]);
        iter.close().unwrap();
    }

    #[test]
    fn memory_clear() {
        let store = InMemoryStore::with_entries([("a", b"1".to_vec())]);
        store.clear();
        assert!(store.is_empty());
    }
}
