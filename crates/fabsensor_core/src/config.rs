//! Record service configuration.

use crate::keys::SEED_KEY_PREFIX;

/// How stored payloads are decoded on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Unreadable or partial payloads decode with empty fields.
    ///
    /// Compatible with records written by older tooling.
    #[default]
    BestEffort,
    /// Unreadable or partial payloads fail with [`crate::RecordError::Decode`].
    Strict,
}

/// Configuration for a [`crate::RecordService`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix of the keys written by `seed`.
    pub key_prefix: String,

    /// How stored payloads are decoded.
    pub decode_mode: DecodeMode,

    /// How many times a read-modify-write is attempted before giving up on
    /// a key that keeps changing underneath it. Values below 1 act as 1.
    pub max_update_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: SEED_KEY_PREFIX.to_string(),
            decode_mode: DecodeMode::BestEffort,
            max_update_attempts: 3,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed key prefix.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the decode mode.
    #[must_use]
    pub const fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Sets the maximum number of read-modify-write attempts.
    #[must_use]
    pub const fn max_update_attempts(mut self, attempts: u32) -> Self {
        self.max_update_attempts = attempts;
        self
    }

    /// Returns the effective attempt count, never less than one.
    pub(crate) fn update_attempts(&self) -> u32 {
        self.max_update_attempts.max(1)
    }
}
