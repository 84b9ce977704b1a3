//! Benchmark helpers for the fabsensor crates.

pub mod utils;

pub use utils::{populated_store, random_field, random_record};
