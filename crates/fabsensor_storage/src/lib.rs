//! # fabsensor Storage
//!
//! The ordered key-value store contract that fabsensor records live in.
//!
//! This crate provides the lowest-level storage abstraction for fabsensor.
//! Stores are **opaque byte maps** keyed by strings - they do not interpret
//! the values they hold.
//!
//! ## Design Principles
//!
//! - Stores expose point get, point put, compare-and-put and range scan
//! - Range scans return keys in the store's native order
//! - Scan iterators hold a store-side resource until `close` is called
//! - Must be `Send + Sync` for concurrent access
//! - fabsensor owns all value interpretation
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral storage
//!
//! ## Example
//!
//! ```rust
//! use fabsensor_storage::{KvStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.put("SENSOR0", b"hello world").unwrap();
//! let data = store.get("SENSOR0").unwrap();
//! assert_eq!(data.as_deref(), Some(&b"hello world"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod memory;

pub use backend::{KvEntry, KvIterator, KvStore};
pub use error::{StorageError, StorageResult};
pub use memory::{InMemoryStore, MemoryIterator};
