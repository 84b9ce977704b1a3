//! Preset records written by `seed`.

use fabsensor_codec::SensorRecord;

/// Number of records written by `seed`.
pub const SEED_COUNT: usize = 10;

const SEED_OWNER: &str = "UserA";
const SEED_FROM: &str = "CNC";
const SEED_TIME: &str = "1623057190444";
const SEED_ADDRESS: &str = "swdbucket";

// Five digests, each used twice.
const SEED_HASHES: [&str; SEED_COUNT] = [
    "9218e8b37fabdc50bb6eca8597ffce22",
    "fe2b8c1ba153119466f9380b84553d87",
    "1e80de3f054f2d26b03f8c1c4de3f6b1",
    "3fc9480c6a6072853d478f4c04686936",
    "7730ca003aa8dd4e210685b4bbf95d56",
    "9218e8b37fabdc50bb6eca8597ffce22",
    "fe2b8c1ba153119466f9380b84553d87",
    "1e80de3f054f2d26b03f8c1c4de3f6b1",
    "3fc9480c6a6072853d478f4c04686936",
    "7730ca003aa8dd4e210685b4bbf95d56",
];

/// Returns the preset records in seeding order.
///
/// The `i`-th record is filed under key index `i`.
pub fn preset_records() -> Vec<SensorRecord> {
    SEED_HASHES
        .iter()
        .map(|hash| SensorRecord::new(SEED_OWNER, SEED_FROM, SEED_TIME, *hash, SEED_ADDRESS))
        .collect()
}
