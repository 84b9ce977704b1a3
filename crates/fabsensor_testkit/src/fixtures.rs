//! Store fixtures and test helpers.
//!
//! Provides convenience functions for setting up stores and services for
//! common test scenarios.

use fabsensor_core::{Config, InMemoryStore, RecordService, SensorRecord};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `warn`. Safe to call from
/// every test; only the first call installs anything.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A record with every field set to a distinct non-preset value.
pub fn sample_record() -> SensorRecord {
    SensorRecord::new(
        "UserB",
        "PLC-7",
        "1623057199999",
        "0cc175b9c0f1b6a831c399e269772661",
        "archive-bucket",
    )
}

/// Returns a store holding the ten preset records, and a default service.
pub fn seeded_store() -> (InMemoryStore, RecordService) {
    let store = InMemoryStore::new();
    let service = RecordService::default();
    service
        .seed(&store)
        .expect("seeding an in-memory store cannot fail");
    (store, service)
}

/// Runs a test with an empty in-memory store and a default service.
///
/// # Example
///
/// ```rust
/// use fabsensor_testkit::with_memory_store;
///
/// with_memory_store(|store, service| {
///     assert!(service.list_all(store).unwrap().is_empty());
/// });
/// ```
pub fn with_memory_store<F, R>(f: F) -> R
where
    F: FnOnce(&InMemoryStore, &RecordService) -> R,
{
    with_configured_store(Config::default(), f)
}

/// Runs a test with an empty in-memory store and a service built from
/// `config`.
pub fn with_configured_store<F, R>(config: Config, f: F) -> R
where
    F: FnOnce(&InMemoryStore, &RecordService) -> R,
{
    init_tracing();
    let store = InMemoryStore::new();
    let service = RecordService::new(config);
    f(&store, &service)
}

/// Runs a test with a seeded in-memory store and a default service.
pub fn with_seeded_store<F, R>(f: F) -> R
where
    F: FnOnce(&InMemoryStore, &RecordService) -> R,
{
    init_tracing();
    let (store, service) = seeded_store();
    f(&store, &service)
}
