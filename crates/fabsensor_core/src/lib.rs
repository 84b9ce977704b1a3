//! # fabsensor Core
//!
//! Sensor record management over an ordered key-value store.
//!
//! This crate provides:
//! - [`RecordService`] - seed, create, get, list and update sensor records
//! - The key scheme used for seeded records
//! - Read-modify-write updates guarded by compare-and-put
//! - Scans whose store iterator is always closed
//!
//! The store itself (durability, replication, isolation) is supplied by the
//! caller through the [`KvStore`] trait.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod keys;
mod scan;
mod seed;
mod service;

pub use config::{Config, DecodeMode};
pub use error::{RecordError, RecordResult};
pub use keys::{sensor_key, SEED_KEY_PREFIX};
pub use seed::{preset_records, SEED_COUNT};
pub use service::RecordService;

pub use fabsensor_codec::{RecordEntry, SensorRecord};
pub use fabsensor_storage::{InMemoryStore, KvEntry, KvIterator, KvStore, StorageError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
