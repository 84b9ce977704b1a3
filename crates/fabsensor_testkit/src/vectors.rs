//! Legacy payload vectors.
//!
//! Payloads as they may be found in stores written by older tooling, with
//! the record each one must decode to. These pin down the lenient decoder
//! and record where the strict decoder must refuse.

use fabsensor_core::SensorRecord;
use serde::{Deserialize, Serialize};

/// A stored payload and how each decoder must treat it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Raw payload as stored. Not necessarily valid UTF-8.
    pub payload: Vec<u8>,
    /// Record the best-effort decoder must produce.
    pub best_effort: SensorRecord,
    /// Whether the strict decoder must accept the payload.
    pub strict_ok: bool,
}

fn vector(
    id: &str,
    description: &str,
    payload: impl Into<Vec<u8>>,
    best_effort: SensorRecord,
    strict_ok: bool,
) -> PayloadVector {
    PayloadVector {
        id: id.into(),
        description: description.into(),
        payload: payload.into(),
        best_effort,
        strict_ok,
    }
}

/// Payload vectors covering well-formed, partial and garbled records.
pub fn legacy_payload_vectors() -> Vec<PayloadVector> {
    vec![
        vector(
            "preset_0",
            "First seeded record, as written by the original seeder",
            r#"{"owner":"UserA","from":"CNC","time":"1623057190444","hash":"9218e8b37fabdc50bb6eca8597ffce22","address":"swdbucket"}"#,
            SensorRecord::new(
                "UserA",
                "CNC",
                "1623057190444",
                "9218e8b37fabdc50bb6eca8597ffce22",
                "swdbucket",
            ),
            true,
        ),
        vector(
            "reordered_with_whitespace",
            "Fields in a different order with insignificant whitespace",
            "{ \"address\": \"b\",\n  \"hash\": \"h\", \"time\": \"t\", \"from\": \"f\", \"owner\": \"o\" }",
            SensorRecord::new("o", "f", "t", "h", "b"),
            true,
        ),
        vector(
            "extra_fields",
            "Unknown fields are ignored by both decoders",
            r#"{"owner":"o","from":"f","time":"t","hash":"h","address":"a","firmware":"2.1","calibrated":true}"#,
            SensorRecord::new("o", "f", "t", "h", "a"),
            true,
        ),
        vector(
            "missing_address",
            "Record written before the address field existed",
            r#"{"owner":"UserA","from":"CNC","time":"1623057190444","hash":"fe2b8c1ba153119466f9380b84553d87"}"#,
            SensorRecord::new(
                "UserA",
                "CNC",
                "1623057190444",
                "fe2b8c1ba153119466f9380b84553d87",
                "",
            ),
            false,
        ),
        vector(
            "capitalized_names",
            "Field names in a different case",
            r#"{"Owner":"o","From":"f","Time":"t","Hash":"h","Address":"a"}"#,
            SensorRecord::new("o", "f", "t", "h", "a"),
            false,
        ),
        vector(
            "repeated_name_last_wins",
            "Same field under two spellings; the later key is used",
            r#"{"owner":"first","from":"f","time":"t","hash":"h","OWNER":"second"}"#,
            SensorRecord::new("second", "f", "t", "h", ""),
            false,
        ),
        vector(
            "invalid_utf8_in_field",
            "A stray non-UTF-8 byte inside one field",
            &b"{\"owner\":\"UserA\",\"from\":\"CN\xffC\",\"time\":\"1623057190444\",\"hash\":\"9218e8b37fabdc50bb6eca8597ffce22\",\"address\":\"swdbucket\"}"[..],
            SensorRecord::new(
                "UserA",
                "CN\u{FFFD}C",
                "1623057190444",
                "9218e8b37fabdc50bb6eca8597ffce22",
                "swdbucket",
            ),
            false,
        ),
        vector(
            "numeric_time",
            "Timestamp stored as a number instead of a string",
            r#"{"owner":"o","from":"f","time":1623057190444,"hash":"h","address":"a"}"#,
            SensorRecord::new("o", "f", "", "h", "a"),
            false,
        ),
        vector(
            "null_owner",
            "Owner explicitly null",
            r#"{"owner":null,"from":"f","time":"t","hash":"h","address":"a"}"#,
            SensorRecord::new("", "f", "t", "h", "a"),
            false,
        ),
        vector(
            "empty_object",
            "Empty JSON object",
            "{}",
            SensorRecord::default(),
            false,
        ),
        vector(
            "truncated",
            "Payload cut off mid-write",
            r#"{"owner":"UserA","from":"CN"#,
            SensorRecord::default(),
            false,
        ),
        vector(
            "not_an_object",
            "A JSON array in place of a record",
            r#"["UserA","CNC"]"#,
            SensorRecord::default(),
            false,
        ),
        vector(
            "empty_payload",
            "Zero-length value",
            "",
            SensorRecord::default(),
            false,
        ),
    ]
}
