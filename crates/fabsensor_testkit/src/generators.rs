//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records, keys and operation
//! sequences.

use fabsensor_core::SensorRecord;
use proptest::prelude::*;

/// Strategy for generating opaque field values.
///
/// Mixes printable text with arbitrary unicode, since the record layer
/// must carry any string unchanged.
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex("[A-Za-z0-9 ._:/-]{0,40}").expect("Invalid regex"),
        1 => any::<String>(),
    ]
}

/// Strategy for generating sensor records.
pub fn record_strategy() -> impl Strategy<Value = SensorRecord> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
    )
        .prop_map(|(owner, from, time, hash, address)| {
            SensorRecord::new(owner, from, time, hash, address)
        })
}

/// Strategy for generating store keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_-]{0,23}").expect("Invalid regex")
}

/// Strategy for generating keys from a small pool, so operations collide.
pub fn colliding_key_strategy() -> impl Strategy<Value = String> {
    (0usize..6).prop_map(|i| format!("SENSOR{i}"))
}

/// A single record operation for model-based tests.
#[derive(Debug, Clone)]
pub enum RecordOperation {
    /// Create (or overwrite) a record
    Create {
        /// Store key
        key: String,
        /// Record to write
        record: SensorRecord,
    },
    /// Change a record's owner
    SetOwner {
        /// Store key
        key: String,
        /// New owner
        owner: String,
    },
    /// Change a record's time and hash
    SetStatus {
        /// Store key
        key: String,
        /// New time
        time: String,
        /// New hash
        hash: String,
    },
    /// Read a record
    Get {
        /// Store key
        key: String,
    },
}

/// Strategy for generating a single record operation.
pub fn operation_strategy() -> impl Strategy<Value = RecordOperation> {
    prop_oneof![
        (colliding_key_strategy(), record_strategy())
            .prop_map(|(key, record)| RecordOperation::Create { key, record }),
        (colliding_key_strategy(), field_strategy())
            .prop_map(|(key, owner)| RecordOperation::SetOwner { key, owner }),
        (colliding_key_strategy(), field_strategy(), field_strategy())
            .prop_map(|(key, time, hash)| RecordOperation::SetStatus { key, time, hash }),
        colliding_key_strategy().prop_map(|key| RecordOperation::Get { key }),
    ]
}

/// Strategy for generating a sequence of record operations.
pub fn operation_sequence_strategy(
    max_len: usize,
) -> impl Strategy<Value = Vec<RecordOperation>> {
    prop::collection::vec(operation_strategy(), 0..max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn keys_are_non_empty() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let key = key_strategy().new_tree(&mut runner).unwrap().current();
            assert!(!key.is_empty());
            assert!(key.len() <= 24);
        }
    }

    #[test]
    fn colliding_keys_use_the_seed_scheme() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let key = colliding_key_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(key.starts_with("SENSOR"));
        }
    }

    proptest! {
        #[test]
        fn sequences_respect_max_len(ops in operation_sequence_strategy(8)) {
            prop_assert!(ops.len() < 8);
        }
    }
}
