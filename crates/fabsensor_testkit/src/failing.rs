//! Failure injection for store-facing tests.

use fabsensor_storage::{KvEntry, KvIterator, KvStore, StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Failure {
    /// Error is returned on the next call only, then cleared.
    Once(StorageError),
    /// Error is returned on every subsequent call until explicitly cleared.
    Persistent(StorageError),
    /// The next `remaining` calls succeed, then the error becomes persistent.
    After {
        remaining: usize,
        err: StorageError,
    },
}

type FailSlot = Mutex<Option<Failure>>;

/// Checks a [`FailSlot`] and returns an error if one is due.
fn check_failure(slot: &FailSlot) -> StorageResult<()> {
    let mut guard = slot.lock();
    match guard.take() {
        None => Ok(()),
        Some(Failure::Once(err)) => Err(err),
        Some(Failure::Persistent(err)) | Some(Failure::After { remaining: 0, err }) => {
            *guard = Some(Failure::Persistent(err.clone()));
            Err(err)
        }
        Some(Failure::After { remaining, err }) => {
            *guard = Some(Failure::After {
                remaining: remaining - 1,
                err,
            });
            Ok(())
        }
    }
}

/// A store wrapper that delegates to an inner [`KvStore`] but can inject
/// failures into any call on demand.
///
/// Failures can be *persistent* (returned on every call until cleared),
/// *once* (returned on the next call, then automatically cleared) or
/// *after n* (the next `n` calls succeed, then every call fails).
///
/// The wrapper also counts calls, so tests can assert that scans were
/// closed and how many writes reached the store.
///
/// # Example
///
/// ```rust
/// use fabsensor_storage::{InMemoryStore, KvStore, StorageError};
/// use fabsensor_testkit::FailingStore;
///
/// let store = FailingStore::wrap(InMemoryStore::new());
/// store.fail_put(StorageError::backend("disk full"));
/// assert!(store.put("k", b"v").is_err());
///
/// store.clear_failures();
/// assert!(store.put("k", b"v").is_ok());
/// ```
pub struct FailingStore {
    inner: Box<dyn KvStore>,
    fail_get: FailSlot,
    fail_put: FailSlot,
    fail_compare_and_put: FailSlot,
    fail_scan: FailSlot,
    fail_next: FailSlot,
    fail_close: FailSlot,
    interference: Mutex<VecDeque<Vec<u8>>>,
    put_calls: AtomicUsize,
    scans_opened: AtomicUsize,
    close_calls: AtomicUsize,
}

impl FailingStore {
    /// Wraps an existing store, with all failure injections initially off.
    pub fn wrap(inner: impl KvStore + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            fail_get: Mutex::new(None),
            fail_put: Mutex::new(None),
            fail_compare_and_put: Mutex::new(None),
            fail_scan: Mutex::new(None),
            fail_next: Mutex::new(None),
            fail_close: Mutex::new(None),
            interference: Mutex::new(VecDeque::new()),
            put_calls: AtomicUsize::new(0),
            scans_opened: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
        }
    }

    /// Makes `get` return the given error on every subsequent call.
    pub fn fail_get(&self, err: StorageError) {
        *self.fail_get.lock() = Some(Failure::Persistent(err));
    }

    /// Makes `get` return the given error on the next call only.
    pub fn fail_get_once(&self, err: StorageError) {
        *self.fail_get.lock() = Some(Failure::Once(err));
    }

    /// Makes `put` return the given error on every subsequent call.
    pub fn fail_put(&self, err: StorageError) {
        *self.fail_put.lock() = Some(Failure::Persistent(err));
    }

    /// Lets the next `successes` calls to `put` through, then fails every call.
    pub fn fail_put_after(&self, successes: usize, err: StorageError) {
        *self.fail_put.lock() = Some(Failure::After {
            remaining: successes,
            err,
        });
    }

    /// Makes `compare_and_put` return the given error on every subsequent call.
    pub fn fail_compare_and_put(&self, err: StorageError) {
        *self.fail_compare_and_put.lock() = Some(Failure::Persistent(err));
    }

    /// Makes `scan_range` return the given error on every subsequent call.
    pub fn fail_scan(&self, err: StorageError) {
        *self.fail_scan.lock() = Some(Failure::Persistent(err));
    }

    /// Lets iterators yield `successes` entries, then fail every `next_entry`.
    ///
    /// The count is shared by all iterators opened from this store.
    pub fn fail_next_after(&self, successes: usize, err: StorageError) {
        *self.fail_next.lock() = Some(Failure::After {
            remaining: successes,
            err,
        });
    }

    /// Makes iterator `close` return the given error on every subsequent call.
    pub fn fail_close(&self, err: StorageError) {
        *self.fail_close.lock() = Some(Failure::Persistent(err));
    }

    /// Simulates a concurrent writer on the next `compare_and_put` calls.
    ///
    /// Before each affected call, the next of `values` is written to the
    /// key directly, one value per call. A caller whose expected value
    /// differs from the written one has its swap refused.
    pub fn interfere_with_updates<I>(&self, values: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        *self.interference.lock() = values.into_iter().collect();
    }

    /// Turns off all injected failures and interference.
    pub fn clear_failures(&self) {
        for slot in [
            &self.fail_get,
            &self.fail_put,
            &self.fail_compare_and_put,
            &self.fail_scan,
            &self.fail_next,
            &self.fail_close,
        ] {
            *slot.lock() = None;
        }
        self.interference.lock().clear();
    }

    /// Returns how many `put` calls reached the inner store.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::Acquire)
    }

    /// Returns how many scans were opened successfully.
    pub fn scans_opened(&self) -> usize {
        self.scans_opened.load(Ordering::Acquire)
    }

    /// Returns how many times `close` was called on this store's iterators.
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for FailingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailingStore")
            .field("put_calls", &self.put_calls())
            .field("scans_opened", &self.scans_opened())
            .field("close_calls", &self.close_calls())
            .finish_non_exhaustive()
    }
}

impl KvStore for FailingStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        check_failure(&self.fail_get)?;
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        check_failure(&self.fail_put)?;
        self.put_calls.fetch_add(1, Ordering::AcqRel);
        self.inner.put(key, value)
    }

    fn compare_and_put(
        &self,
        key: &str,
        expected: Option<&[u8]>,
        value: &[u8],
    ) -> StorageResult<bool> {
        check_failure(&self.fail_compare_and_put)?;
        let concurrent = self.interference.lock().pop_front();
        if let Some(concurrent) = concurrent {
            self.inner.put(key, &concurrent)?;
        }
        self.inner.compare_and_put(key, expected, value)
    }

    fn scan_range(&self, start: &str, end: &str) -> StorageResult<Box<dyn KvIterator + '_>> {
        check_failure(&self.fail_scan)?;
        let inner = self.inner.scan_range(start, end)?;
        self.scans_opened.fetch_add(1, Ordering::AcqRel);
        Ok(Box::new(FailingIterator { inner, store: self }))
    }
}

struct FailingIterator<'a> {
    inner: Box<dyn KvIterator + 'a>,
    store: &'a FailingStore,
}

impl KvIterator for FailingIterator<'_> {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn next_entry(&mut self) -> StorageResult<KvEntry> {
        check_failure(&self.store.fail_next)?;
        self.inner.next_entry()
    }

    fn close(&mut self) -> StorageResult<()> {
        self.store.close_calls.fetch_add(1, Ordering::AcqRel);
        let released = self.inner.close();
        check_failure(&self.store.fail_close)?;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabsensor_storage::InMemoryStore;

    fn err() -> StorageError {
        StorageError::backend("injected")
    }

    #[test]
    fn passes_through_without_failures() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v"[..]));
        assert_eq!(store.put_calls(), 1);
    }

    #[test]
    fn once_failure_clears_itself() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.fail_get_once(err());
        assert_eq!(store.get("k"), Err(err()));
        assert_eq!(store.get("k"), Ok(None));
    }

    #[test]
    fn persistent_failure_sticks_until_cleared() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.fail_put(err());
        assert!(store.put("a", b"1").is_err());
        assert!(store.put("b", b"2").is_err());
        assert_eq!(store.put_calls(), 0);

        store.clear_failures();
        assert!(store.put("c", b"3").is_ok());
    }

    #[test]
    fn after_failure_counts_down() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.fail_put_after(2, err());
        assert!(store.put("a", b"1").is_ok());
        assert!(store.put("b", b"2").is_ok());
        assert!(store.put("c", b"3").is_err());
        assert!(store.put("d", b"4").is_err());
        assert_eq!(store.put_calls(), 2);
    }

    #[test]
    fn iterator_close_is_counted_even_when_failing() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.fail_close(err());

        let mut iter = store.scan_range("", "").unwrap();
        assert!(iter.close().is_err());
        assert_eq!(store.scans_opened(), 1);
        assert_eq!(store.close_calls(), 1);
    }

    #[test]
    fn interference_refuses_the_swap() {
        let store = FailingStore::wrap(InMemoryStore::new());
        store.put("k", b"old").unwrap();
        store.interfere_with_updates([b"theirs".to_vec()]);

        assert!(!store.compare_and_put("k", Some(b"old"), b"mine").unwrap());
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"theirs"[..]));

        assert!(store.compare_and_put("k", Some(b"theirs"), b"mine").unwrap());
    }
}
