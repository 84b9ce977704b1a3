//! # fabsensor Codec
//!
//! The sensor record model and its JSON encoding.
//!
//! Records are stored as field-name-tagged JSON objects:
//!
//! ```text
//! {"owner":"UserA","from":"CNC","time":"1623057190444","hash":"...","address":"swdbucket"}
//! ```
//!
//! The encoding is human-readable and self-describing, so store contents
//! can be inspected by external tooling and new fields can be added
//! without breaking older readers.
//!
//! ## Decoding modes
//!
//! - [`decode_record`] - strict, fails on missing or mistyped fields
//! - [`decode_best_effort`] - lenient, never fails, fills gaps with `""`
//!
//! ## Usage
//!
//! ```
//! use fabsensor_codec::{decode_record, encode_record, SensorRecord};
//!
//! let record = SensorRecord::new("UserA", "CNC", "1623057190444", "9218e8b3", "swdbucket");
//! let bytes = encode_record(&record).unwrap();
//!
//! let decoded = decode_record(&bytes).unwrap();
//! assert_eq!(record, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod record;

pub use decoder::{decode_best_effort, decode_lenient, decode_record};
pub use encoder::{encode_record, RecordEncoder};
pub use error::{CodecError, CodecResult};
pub use record::{RecordEntry, SensorRecord, FIELD_NAMES};

/// Trait for types that can be encoded to record bytes.
pub trait Encode {
    /// Encode this value to bytes.
    fn encode(&self) -> CodecResult<Vec<u8>>;
}

/// Trait for types that can be decoded from record bytes.
pub trait Decode: Sized {
    /// Decode this value from bytes, strictly.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl Encode for SensorRecord {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        encode_record(self)
    }
}

impl Decode for SensorRecord {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        decode_record(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = SensorRecord> {
        (
            any::<String>(),
            any::<String>(),
            any::<String>(),
            any::<String>(),
            any::<String>(),
        )
            .prop_map(|(owner, from, time, hash, address)| {
                SensorRecord::new(owner, from, time, hash, address)
            })
    }

    proptest! {
        #[test]
        fn strict_roundtrip(record in record_strategy()) {
            let bytes = record.encode().unwrap();
            prop_assert_eq!(SensorRecord::decode(&bytes).unwrap(), record);
        }

        #[test]
        fn best_effort_agrees_with_strict_on_encoded_records(record in record_strategy()) {
            let bytes = encode_record(&record).unwrap();
            let (lenient, issue) = decode_lenient(&bytes);
            prop_assert!(issue.is_none());
            prop_assert_eq!(lenient, record);
        }

        #[test]
        fn best_effort_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_best_effort(&bytes);
        }
    }
}
