//! Scoped range scans.

use fabsensor_storage::{KvIterator, KvStore, StorageResult};
use std::ops::{Deref, DerefMut};

/// An open store iterator that is closed when the guard is dropped.
///
/// Every exit path out of a scan, including `?` on a mid-stream error,
/// drops the guard, so the store-side resource is released exactly once.
pub(crate) struct ScanGuard<'a> {
    iter: Box<dyn KvIterator + 'a>,
}

impl<'a> ScanGuard<'a> {
    /// Opens a scan over `[start, end)`.
    pub(crate) fn open<S: KvStore + ?Sized>(
        store: &'a S,
        start: &str,
        end: &str,
    ) -> StorageResult<Self> {
        Ok(Self {
            iter: store.scan_range(start, end)?,
        })
    }
}

impl<'a> Deref for ScanGuard<'a> {
    type Target = dyn KvIterator + 'a;

    fn deref(&self) -> &Self::Target {
        self.iter.as_ref()
    }
}

impl DerefMut for ScanGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.iter.as_mut()
    }
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.iter.close() {
            tracing::warn!(error = %err, "failed to close store iterator");
        }
    }
}
