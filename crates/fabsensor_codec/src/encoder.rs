//! JSON record encoder.

use crate::error::CodecResult;
use crate::record::SensorRecord;

/// Encode a record to JSON bytes.
///
/// Fields are written by name in the order `owner`, `from`, `time`,
/// `hash`, `address`, so the payload stays readable by external tooling
/// and tolerant of added fields.
///
/// # Errors
///
/// Only fails if the serializer itself fails; an in-memory record of
/// strings always encodes.
pub fn encode_record(record: &SensorRecord) -> CodecResult<Vec<u8>> {
    let mut encoder = RecordEncoder::new();
    encoder.encode(record)?;
    Ok(encoder.into_bytes())
}

/// A JSON record encoder that can reuse its output buffer.
#[derive(Debug, Default)]
pub struct RecordEncoder {
    buffer: Vec<u8>,
}

impl RecordEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new encoder with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode a record, appending to the buffer.
    pub fn encode(&mut self, record: &SensorRecord) -> CodecResult<()> {
        serde_json::to_writer(&mut self.buffer, record)?;
        Ok(())
    }

    /// Clear the buffer, keeping its allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fields_by_name_in_order() {
        let record = SensorRecord::new(
            "UserA",
            "CNC",
            "1623057190444",
            "9218e8b37fabdc50bb6eca8597ffce22",
            "swdbucket",
        );
        let bytes = encode_record(&record).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"owner":"UserA","from":"CNC","time":"1623057190444","hash":"9218e8b37fabdc50bb6eca8597ffce22","address":"swdbucket"}"#
        );
    }

    #[test]
    fn encodes_blank_record_with_every_field() {
        let bytes = encode_record(&SensorRecord::default()).unwrap();
        assert_eq!(
            bytes,
            br#"{"owner":"","from":"","time":"","hash":"","address":""}"#
        );
    }

    #[test]
    fn escapes_special_characters() {
        let record = SensorRecord::new("a\"b", "line\nbreak", "", "", "\u{e9}");
        let bytes = encode_record(&record).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.contains(r#""owner":"a\"b""#));
        assert!(text.contains(r#""from":"line\nbreak""#));
    }

    #[test]
    fn deterministic_encoding() {
        let record = SensorRecord::new("o", "f", "t", "h", "a");
        assert_eq!(
            encode_record(&record).unwrap(),
            encode_record(&record.clone()).unwrap()
        );
    }

    #[test]
    fn encoder_reuses_buffer() {
        let mut encoder = RecordEncoder::with_capacity(128);
        encoder.encode(&SensorRecord::new("a", "", "", "", "")).unwrap();
        encoder.reset();
        encoder.encode(&SensorRecord::new("b", "", "", "", "")).unwrap();
        assert!(encoder.as_bytes().starts_with(br#"{"owner":"b""#));
    }
}
