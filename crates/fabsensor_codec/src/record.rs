//! The sensor record and its scan projection.

use serde::{Deserialize, Serialize};

/// Names of the serialized record fields, in encoding order.
pub const FIELD_NAMES: [&str; 5] = ["owner", "from", "time", "hash", "address"];

/// A sensor record.
///
/// Every field is an opaque string: timestamps, digests and storage
/// pointers are not parsed or validated at this layer. A record carries no
/// identity of its own - it is identified by the store key it is filed
/// under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorRecord {
    /// The identity currently controlling the sensor.
    pub owner: String,
    /// Origin or device tag.
    pub from: String,
    /// Caller-supplied timestamp.
    pub time: String,
    /// Content-integrity digest.
    pub hash: String,
    /// Storage-location pointer.
    pub address: String,
}

impl SensorRecord {
    /// Creates a record from its five fields.
    pub fn new(
        owner: impl Into<String>,
        from: impl Into<String>,
        time: impl Into<String>,
        hash: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            from: from.into(),
            time: time.into(),
            hash: hash.into(),
            address: address.into(),
        }
    }

    /// Returns true if every field is empty.
    ///
    /// This is what best-effort decoding yields for unreadable payloads.
    pub fn is_blank(&self) -> bool {
        self.owner.is_empty()
            && self.from.is_empty()
            && self.time.is_empty()
            && self.hash.is_empty()
            && self.address.is_empty()
    }

    /// Returns a mutable reference to the field named `name`, if it exists.
    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "owner" => Some(&mut self.owner),
            "from" => Some(&mut self.from),
            "time" => Some(&mut self.time),
            "hash" => Some(&mut self.hash),
            "address" => Some(&mut self.address),
            _ => None,
        }
    }
}

/// A store key paired with the record decoded from its value.
///
/// Produced by range scans only; never persisted. Serializes as
/// `{"Key": ..., "Record": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// The store key the record is filed under.
    #[serde(rename = "Key")]
    pub key: String,
    /// The decoded record.
    #[serde(rename = "Record")]
    pub record: SensorRecord,
}

impl RecordEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, record: SensorRecord) -> Self {
        Self {
            key: key.into(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_blank() {
        assert!(SensorRecord::default().is_blank());
        assert!(!SensorRecord::new("UserA", "", "", "", "").is_blank());
    }

    #[test]
    fn field_mut_covers_every_field() {
        let mut record = SensorRecord::default();
        for name in FIELD_NAMES {
            *record.field_mut(name).unwrap() = name.to_uppercase();
        }
        assert_eq!(
            record,
            SensorRecord::new("OWNER", "FROM", "TIME", "HASH", "ADDRESS")
        );
        assert!(record.field_mut("Owner").is_none());
    }

    #[test]
    fn entry_uses_legacy_field_names() {
        let entry = RecordEntry::new("SENSOR0", SensorRecord::new("a", "b", "c", "d", "e"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"Key":"SENSOR0","Record":{"owner":"a","from":"b","time":"c","hash":"d","address":"e"}}"#
        );
    }
}
