//! Cache entry format shared by every store
//!
//! An entry is the upstream JSON body verbatim plus the local time it was
//! written. On disk it is exactly `{"timestamp": "...", "data": ...}`.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Upper bound on hour values converted to a `Duration` (about 114,000 years)
const MAX_HOURS: f64 = 1.0e9;

/// The latest payload stored for one cache key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the entry was written (local clock)
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
    /// The upstream response body
    pub data: Value,
}

impl CacheEntry {
    /// Creates an entry stamped with the current local time
    pub fn new(data: Value) -> Self {
        Self::written_at(data, Local::now())
    }

    /// Creates an entry with an explicit write time
    pub fn written_at(data: Value, timestamp: DateTime<Local>) -> Self {
        Self { timestamp, data }
    }

    /// Elapsed time since the entry was written
    pub fn age(&self) -> Duration {
        self.age_at(Local::now())
    }

    /// Elapsed time between the write and `now`
    pub fn age_at(&self, now: DateTime<Local>) -> Duration {
        now - self.timestamp
    }

    /// Whether the entry is younger than `max_age`.
    ///
    /// A zero or negative `max_age` never counts as fresh.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.is_fresh_at(max_age, Local::now())
    }

    /// Freshness check against an explicit clock reading
    pub fn is_fresh_at(&self, max_age: Duration, now: DateTime<Local>) -> bool {
        max_age > Duration::zero() && self.age_at(now) < max_age
    }
}

/// Converts fractional hours (as used in configuration) to a `Duration`.
///
/// Non-finite input maps to zero, which is never fresh.
pub fn hours_to_duration(hours: f64) -> Duration {
    if !hours.is_finite() {
        return Duration::zero();
    }
    let hours = hours.clamp(-MAX_HOURS, MAX_HOURS);
    Duration::milliseconds((hours * MILLIS_PER_HOUR) as i64)
}

/// Converts a `Duration` to fractional hours
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 ones.
///
/// Offset-less timestamps are read as local time.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: '{raw}'")))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local));
    }
    let naive = raw.parse::<NaiveDateTime>().ok()?;
    Local.from_local_datetime(&naive).earliest()
}
