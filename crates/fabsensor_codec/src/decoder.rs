//! JSON record decoders.
//!
//! Two decoders are provided:
//!
//! - [`decode_record`] is strict: every field must be present and be a
//!   string, and the payload must be well-formed JSON.
//! - [`decode_best_effort`] is lenient: it never fails, filling anything it
//!   cannot read with empty strings. Records written by older tooling are
//!   read this way.
//!
//! Both ignore unknown fields.
//!
//! The lenient decoder walks object keys in document order. A key names a
//! field if it equals the field name ignoring ASCII case, and when several
//! keys name the same field the last one wins. Invalid UTF-8 inside the
//! payload is replaced with U+FFFD rather than discarding the record.

use crate::error::{CodecError, CodecResult};
use crate::record::{SensorRecord, FIELD_NAMES};
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// Decode a record from JSON bytes, strictly.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON, are not an object, or
/// any of the five fields is missing or not a string.
pub fn decode_record(bytes: &[u8]) -> CodecResult<SensorRecord> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a record from JSON bytes, leniently.
///
/// - Unknown fields are ignored
/// - Missing, `null` or non-string fields decode as empty strings
/// - Malformed or non-object input decodes as an all-empty record
/// - Invalid UTF-8 is replaced with U+FFFD
///
/// Field names match ignoring ASCII case; the last matching key wins.
pub fn decode_best_effort(bytes: &[u8]) -> SensorRecord {
    decode_lenient(bytes).0
}

/// Decode a record leniently, also reporting the first problem found.
///
/// The record is the same one [`decode_best_effort`] returns. Whenever the
/// error is `None`, [`decode_record`] accepts the payload and yields the
/// same record.
pub fn decode_lenient(bytes: &[u8]) -> (SensorRecord, Option<CodecError>) {
    let mut issue = None;

    let payload = match serde_json::from_slice::<Payload>(bytes) {
        Ok(payload) => payload,
        Err(err) => match std::str::from_utf8(bytes) {
            Ok(_) => return (SensorRecord::default(), Some(err.into())),
            Err(utf8) => {
                let text = String::from_utf8_lossy(bytes);
                match serde_json::from_str::<Payload>(&text) {
                    Ok(payload) => {
                        issue = Some(CodecError::decoding_failed(format!(
                            "payload is not valid UTF-8: {utf8}"
                        )));
                        payload
                    }
                    Err(_) => return (SensorRecord::default(), Some(err.into())),
                }
            }
        },
    };

    let entries = match payload {
        Payload::Object(entries) => entries,
        Payload::Other(kind) => {
            let issue = CodecError::decoding_failed(format!("expected JSON object, found {kind}"));
            return (SensorRecord::default(), Some(issue));
        }
    };

    let mut record = SensorRecord::default();

    for name in FIELD_NAMES {
        let mut matches = entries
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name));
        let Some(first) = matches.next() else {
            issue.get_or_insert_with(|| {
                CodecError::decoding_failed(format!("missing field `{name}`"))
            });
            continue;
        };
        let count = 1 + matches.clone().count();
        let (found, value) = matches.last().unwrap_or(first);

        let problem = match value {
            Value::String(s) => {
                if let Some(slot) = record.field_mut(name) {
                    slot.clone_from(s);
                }
                if count > 1 {
                    Some(format!("field `{name}` appears {count} times"))
                } else if found != name {
                    Some(format!("field `{name}` matched as `{found}`"))
                } else {
                    None
                }
            }
            other => Some(format!(
                "field `{name}` is {}, expected string",
                kind_of(other)
            )),
        };
        if let Some(problem) = problem {
            issue.get_or_insert_with(|| CodecError::decoding_failed(problem));
        }
    }

    (record, issue)
}

/// A top-level JSON value, keeping object keys in document order.
enum Payload {
    Object(Vec<(String, Value)>),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = Payload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Payload, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(Payload::Object(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Payload, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Payload::Other("an array"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Payload, E> {
        Ok(Payload::Other("null"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Payload, E> {
        Ok(Payload::Other("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Payload, E> {
        Ok(Payload::Other("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Payload, E> {
        Ok(Payload::Other("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Payload, E> {
        Ok(Payload::Other("a number"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Payload, E> {
        Ok(Payload::Other("a string"))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
