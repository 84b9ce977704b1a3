//! The record service: seed, create, look up, enumerate and update records.

use crate::config::{Config, DecodeMode};
use crate::error::{RecordError, RecordResult};
use crate::keys::sensor_key;
use crate::scan::ScanGuard;
use crate::seed::preset_records;
use fabsensor_codec::{decode_lenient, decode_record, encode_record, RecordEntry, SensorRecord};
use fabsensor_storage::{KvEntry, KvStore};
use tracing::{debug, warn};

/// Record operations over an ordered key-value store.
///
/// The service holds only its [`Config`]; every operation takes the store
/// explicitly, so one service can be shared across stores and threads.
///
/// Writes that replace a whole record (`seed`, `create`, `put_record`) are
/// unconditional upserts. Partial updates (`set_owner`, `set_status`) are
/// read-modify-write cycles committed with [`KvStore::compare_and_put`]:
/// if another writer changes the key between the read and the write, the
/// cycle is retried from a fresh read, up to
/// [`Config::max_update_attempts`] times.
///
/// # Example
///
/// ```rust
/// use fabsensor_core::{RecordService, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// let service = RecordService::default();
///
/// service.create(&store, "SENSOR42", "UserB", "PLC", "1623057199999", "abc", "bucket").unwrap();
/// service.set_owner(&store, "SENSOR42", "UserC").unwrap();
///
/// let record = service.get(&store, "SENSOR42").unwrap();
/// assert_eq!(record.owner, "UserC");
/// assert_eq!(record.from, "PLC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordService {
    config: Config,
}

impl RecordService {
    /// Creates a service with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes the ten preset records under the configured key prefix
    /// (`SENSOR0`..`SENSOR9` by default).
    ///
    /// Stops at the first failed write. Keys written before the failure
    /// are left in place; seeding is not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreWrite`] for the first key that failed.
    pub fn seed<S: KvStore + ?Sized>(&self, store: &S) -> RecordResult<()> {
        for (index, record) in preset_records().iter().enumerate() {
            let key = sensor_key(&self.config.key_prefix, index);
            self.put_record(store, &key, record)?;
        }
        debug!(prefix = %self.config.key_prefix, "seeded preset records");
        Ok(())
    }

    /// Writes a record built from the given fields under `key`.
    ///
    /// Any existing value at `key` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreWrite`] if the write fails.
    #[allow(clippy::too_many_arguments)]
    pub fn create<S: KvStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
        owner: &str,
        from: &str,
        time: &str,
        hash: &str,
        address: &str,
    ) -> RecordResult<()> {
        let record = SensorRecord::new(owner, from, time, hash, address);
        self.put_record(store, key, &record)
    }

    /// Writes `record` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreWrite`] if the write fails.
    pub fn put_record<S: KvStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
        record: &SensorRecord,
    ) -> RecordResult<()> {
        let bytes = encode_record(record)?;
        store
            .put(key, &bytes)
            .map_err(|source| RecordError::write(key, source))?;
        debug!(key, "wrote record");
        Ok(())
    }

    /// Reads the record stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`RecordError::NotFound`] if the store has no value at `key`
    /// - [`RecordError::StoreRead`] if the read fails
    /// - [`RecordError::Decode`] if the payload is unreadable and the
    ///   service is in [`DecodeMode::Strict`]
    pub fn get<S: KvStore + ?Sized>(&self, store: &S, key: &str) -> RecordResult<SensorRecord> {
        let bytes = self.read_raw(store, key)?;
        self.decode(key, &bytes)
    }

    /// Returns true if the store holds a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreRead`] if the read fails.
    pub fn exists<S: KvStore + ?Sized>(&self, store: &S, key: &str) -> RecordResult<bool> {
        store
            .get(key)
            .map(|value| value.is_some())
            .map_err(|source| RecordError::read(key, source))
    }

    /// Returns every record in the store, in the store's key order.
    ///
    /// The result is fully materialized before returning.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreRead`] if the scan cannot be opened or
    /// fails part way.
    pub fn list_all<S: KvStore + ?Sized>(&self, store: &S) -> RecordResult<Vec<RecordEntry>> {
        self.list_range(store, "", "")
    }

    /// Returns the records with keys in `[start, end)`, in key order.
    ///
    /// Empty bounds are unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::StoreRead`] if the scan cannot be opened or
    /// fails part way.
    pub fn list_range<S: KvStore + ?Sized>(
        &self,
        store: &S,
        start: &str,
        end: &str,
    ) -> RecordResult<Vec<RecordEntry>> {
        let mut scan = ScanGuard::open(store, start, end)
            .map_err(|source| RecordError::scan(start, end, source))?;

        let mut entries = Vec::new();
        while scan.has_next() {
            let KvEntry { key, value } = scan
                .next_entry()
                .map_err(|source| RecordError::scan(start, end, source))?;
            let record = self.decode(&key, &value)?;
            entries.push(RecordEntry::new(key, record));
        }

        debug!(start, end, count = entries.len(), "listed records");
        Ok(entries)
    }

    /// Replaces the `owner` of the record under `key`.
    ///
    /// All other fields are written back unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`RecordService::get`], plus [`RecordError::StoreWrite`] if the
    /// write-back fails and [`RecordError::UpdateConflict`] if the key kept
    /// changing concurrently.
    pub fn set_owner<S: KvStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
        new_owner: &str,
    ) -> RecordResult<()> {
        self.update(store, key, |record| {
            record.owner = new_owner.to_string();
        })
    }

    /// Replaces the `time` and `hash` of the record under `key`.
    ///
    /// All other fields are written back unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`RecordService::set_owner`].
    pub fn set_status<S: KvStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
        new_time: &str,
        new_hash: &str,
    ) -> RecordResult<()> {
        self.update(store, key, |record| {
            record.time = new_time.to_string();
            record.hash = new_hash.to_string();
        })
    }

    fn update<S, F>(&self, store: &S, key: &str, mut mutate: F) -> RecordResult<()>
    where
        S: KvStore + ?Sized,
        F: FnMut(&mut SensorRecord),
    {
        let attempts = self.config.update_attempts();

        for attempt in 1..=attempts {
            let current = self.read_raw(store, key)?;
            let mut record = self.decode(key, &current)?;
            mutate(&mut record);
            let bytes = encode_record(&record)?;

            let committed = store
                .compare_and_put(key, Some(current.as_slice()), &bytes)
                .map_err(|source| RecordError::write(key, source))?;
            if committed {
                debug!(key, attempt, "updated record");
                return Ok(());
            }
            debug!(key, attempt, "record changed during update, retrying");
        }

        Err(RecordError::UpdateConflict {
            key: key.to_string(),
            attempts,
        })
    }

    fn read_raw<S: KvStore + ?Sized>(&self, store: &S, key: &str) -> RecordResult<Vec<u8>> {
        store
            .get(key)
            .map_err(|source| RecordError::read(key, source))?
            .ok_or_else(|| RecordError::not_found(key))
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> RecordResult<SensorRecord> {
        match self.config.decode_mode {
            DecodeMode::Strict => decode_record(bytes).map_err(|source| RecordError::Decode {
                key: key.to_string(),
                source,
            }),
            DecodeMode::BestEffort => {
                let (record, issue) = decode_lenient(bytes);
                if let Some(issue) = issue {
                    warn!(key, %issue, "record decoded with missing or unreadable fields");
                }
                Ok(record)
            }
        }
    }
}
