//! Store key scheme.
//!
//! Records have no identity field; the store key is their identity. Seeded
//! records are filed under a constant prefix followed by a decimal index,
//! zero-based and unpadded: `SENSOR0`, `SENSOR1`, ..., `SENSOR9`.

/// Default prefix of seeded keys.
pub const SEED_KEY_PREFIX: &str = "SENSOR";

/// Builds the key for the `index`-th record under `prefix`.
pub fn sensor_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}
