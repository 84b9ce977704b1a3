//! Benchmark utilities.

use fabsensor_codec::SensorRecord;
use fabsensor_core::{sensor_key, RecordService};
use fabsensor_storage::InMemoryStore;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric field of the given length.
pub fn random_field(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a record whose fields are each `field_len` characters long.
pub fn random_record(field_len: usize) -> SensorRecord {
    SensorRecord::new(
        random_field(field_len),
        random_field(field_len),
        random_field(field_len),
        random_field(field_len),
        random_field(field_len),
    )
}

/// Build a store holding `count` random records under the default prefix.
///
/// # Panics
///
/// Panics if the in-memory store rejects a write.
pub fn populated_store(service: &RecordService, count: usize) -> InMemoryStore {
    let store = InMemoryStore::new();
    for index in 0..count {
        let key = sensor_key(&service.config().key_prefix, index);
        service
            .put_record(&store, &key, &random_record(16))
            .expect("in-memory write failed");
    }
    store
}
