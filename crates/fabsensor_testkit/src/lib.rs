//! # fabsensor Testkit
//!
//! Test utilities for fabsensor.
//!
//! This crate provides:
//! - Store fixtures and tracing setup for tests
//! - Property-based test generators using proptest
//! - A store wrapper that injects failures on demand
//! - Legacy payload vectors for decoder compatibility
//!
//! ## Usage
//!
//! ```rust
//! use fabsensor_testkit::prelude::*;
//!
//! with_seeded_store(|store, service| {
//!     assert_eq!(service.list_all(store).unwrap().len(), 10);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod failing;
pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::failing::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use failing::*;
pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
