//! Fetch-with-cache orchestration
//!
//! `CachedFetcher` wraps every upstream GET with the cache store: fresh
//! entries short-circuit the network, live responses refresh the store, and
//! failed fetches fall back to whatever entry exists, however old.

mod client;
mod result;

use std::time::Duration;

use thiserror::Error;

pub use client::{CachedFetcher, Endpoint, DEFAULT_TIMEOUT};
pub use result::{FetchResult, Freshness, Source};

/// Why a live fetch produced no data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Upstream answered with something other than 200
    #[error("API error: HTTP {0}")]
    Status(u16),

    /// No complete response within the deadline
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Connection, DNS, TLS or request construction failure
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Body was not valid JSON
    #[error("failed to parse API response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Classifies a reqwest error raised while sending or reading a request
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
