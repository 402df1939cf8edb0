//! Durations as integer milliseconds, for hand-edited tuning files.

use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Longest animation phase a tuning file may request.
pub const MAX_MILLIS: u64 = 60_000;

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let millis = value.as_millis().min(u64::MAX as u128) as u64;
    serializer.serialize_u64(millis)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = u64::deserialize(deserializer)?;
    if millis > MAX_MILLIS {
        return Err(D::Error::custom(format!(
            "duration of {millis}ms exceeds the {MAX_MILLIS}ms limit"
        )));
    }
    Ok(Duration::from_millis(millis))
}
