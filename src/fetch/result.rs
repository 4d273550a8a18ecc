//! Tagged outcome of a fetch-with-cache call

use std::fmt;

use chrono::{DateTime, Duration, Local};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::FetchError;
use crate::cache::{duration_to_hours, CacheEntry};

/// Where the returned data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Cache,
    None,
}

/// Result of `CachedFetcher::fetch_with_cache`
///
/// `data` and `timestamp` are set whenever `source` is `Live` or `Cache`,
/// `cache_age` only for `Cache`, and `error` only for `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub source: Source,
    pub data: Option<Value>,
    pub timestamp: Option<DateTime<Local>>,
    pub cache_age: Option<Duration>,
    pub error: Option<FetchError>,
}

impl FetchResult {
    /// Data fetched from the upstream just now
    pub fn live(data: Value, fetched_at: DateTime<Local>) -> Self {
        Self {
            source: Source::Live,
            data: Some(data),
            timestamp: Some(fetched_at),
            cache_age: None,
            error: None,
        }
    }

    /// Data served from a cache entry, fresh or stale
    pub fn cached(entry: CacheEntry) -> Self {
        let age = entry.age();
        Self {
            source: Source::Cache,
            data: Some(entry.data),
            timestamp: Some(entry.timestamp),
            cache_age: Some(age),
            error: None,
        }
    }

    /// Neither the upstream nor the cache had anything
    pub fn unavailable(error: FetchError) -> Self {
        Self {
            source: Source::None,
            data: None,
            timestamp: None,
            cache_age: None,
            error: Some(error),
        }
    }

    pub fn success(&self) -> bool {
        self.source != Source::None
    }

    pub fn cache_age_hours(&self) -> Option<f64> {
        self.cache_age.map(duration_to_hours)
    }

    /// How a caller should present this result
    pub fn freshness(&self) -> Freshness {
        match (self.source, self.cache_age) {
            (Source::Live, _) => Freshness::Live,
            (Source::Cache, age) => Freshness::Cached {
                age: age.unwrap_or_else(Duration::zero),
            },
            (Source::None, _) => Freshness::Unavailable {
                reason: self
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "no data available".to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct WireResult<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_age_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for FetchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireResult {
            success: self.success(),
            data: self.data.as_ref(),
            source: self.source,
            timestamp: self.timestamp.as_ref(),
            cache_age_hours: self.cache_age_hours(),
            error: self.error.as_ref().map(ToString::to_string),
        }
        .serialize(serializer)
    }
}

/// The three states a caller renders
#[derive(Debug, Clone, PartialEq)]
pub enum Freshness {
    /// Just fetched; no annotation needed
    Live,
    /// Served from cache; may be annotated with its age
    Cached { age: Duration },
    /// Nothing to show; offer a retry
    Unavailable { reason: String },
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Live => Ok(()),
            Freshness::Cached { age } => {
                let hours = duration_to_hours(*age);
                if hours < 1.0 {
                    write!(f, "(cached a few minutes ago)")
                } else if hours < 24.0 {
                    write!(f, "(cached {:.0} hours ago)", hours)
                } else {
                    write!(f, "(cached {:.0} days ago)", hours / 24.0)
                }
            }
            Freshness::Unavailable { .. } => write!(f, "(data temporarily unavailable)"),
        }
    }
}
