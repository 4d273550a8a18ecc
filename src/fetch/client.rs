//! HTTP client wrapped in the fetch-with-cache policy

use std::time::Duration as StdDuration;

use chrono::{Duration, Local};
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{FetchError, FetchResult};
use crate::cache::{duration_to_hours, hours_to_duration, CacheEntry, CacheStore};

/// Upper bound on a single live fetch
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// A resolved upstream resource: where to fetch it, where to cache it, how long it stays fresh
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub url: String,
    pub cache_key: String,
    pub max_age: Duration,
}

/// Fetches upstream JSON through a cache store
///
/// Each call makes at most one live request. There is no retry and no
/// de-duplication of concurrent misses for the same key.
#[derive(Debug, Clone)]
pub struct CachedFetcher<S> {
    /// HTTP client for making requests
    http_client: Client,
    /// Store for persisting responses
    store: S,
    /// Deadline for one live fetch, body included
    timeout: StdDuration,
}

impl<S: CacheStore> CachedFetcher<S> {
    /// Creates a fetcher with the default 10 second timeout, preparing the store
    pub fn new(store: S) -> Self {
        store.ensure_storage_ready();
        Self {
            http_client: Client::new(),
            store,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the live fetch deadline
    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timeout(&self) -> StdDuration {
        self.timeout
    }

    /// Returns the freshest data available for `cache_key`
    ///
    /// # Behavior
    /// - A cache entry younger than `max_age` is returned without a network call
    /// - Otherwise `url` is fetched; a 200 JSON body is cached and returned as live
    /// - If the fetch fails for any reason, the cached entry is returned regardless of age
    /// - Only when there is no cached entry at all is the result unsuccessful
    pub async fn fetch_with_cache(&self, url: &str, cache_key: &str, max_age: Duration) -> FetchResult {
        if let Some(entry) = self.store.load(cache_key) {
            if entry.is_fresh(max_age) {
                info!(cache_key, "using fresh cached data");
                return FetchResult::cached(entry);
            }
            debug!(
                cache_key,
                age_hours = duration_to_hours(entry.age()),
                "cached data is stale"
            );
        }

        let error = match self.fetch_live(url).await {
            Ok(data) => {
                let entry = CacheEntry::new(data);
                // A failed save is logged by the store; the live data is still returned
                let _ = self.store.save_entry(cache_key, &entry);
                info!(cache_key, "fresh data fetched and cached");
                return FetchResult::live(entry.data, entry.timestamp);
            }
            Err(error) => error,
        };

        warn!(cache_key, %error, "failed to fetch fresh data");

        match self.store.load(cache_key) {
            Some(entry) => {
                info!(
                    cache_key,
                    age_hours = %format!("{:.1}", duration_to_hours(entry.age())),
                    "using stale cached data"
                );
                FetchResult::cached(entry)
            }
            None => {
                error!(cache_key, "no cached data available");
                FetchResult::unavailable(error)
            }
        }
    }

    /// `fetch_with_cache` with the maximum age given in fractional hours
    pub async fn fetch_with_cache_hours(&self, url: &str, cache_key: &str, max_age_hours: f64) -> FetchResult {
        self.fetch_with_cache(url, cache_key, hours_to_duration(max_age_hours))
            .await
    }

    pub async fn fetch_endpoint(&self, endpoint: &Endpoint) -> FetchResult {
        self.fetch_with_cache(&endpoint.url, &endpoint.cache_key, endpoint.max_age)
            .await
    }

    /// Fetches several endpoints concurrently, returning results in input order
    pub async fn warm(&self, endpoints: &[Endpoint]) -> Vec<FetchResult> {
        join_all(endpoints.iter().map(|endpoint| self.fetch_endpoint(endpoint))).await
    }

    /// One GET against the upstream; anything but a 200 JSON body is an error
    async fn fetch_live(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
