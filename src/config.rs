//! Upstream endpoints and cache lifetimes
//!
//! Everything is read from the environment (a `.env` file is loaded first by
//! the binary) and can be overridden on the command line.

use std::path::PathBuf;

use clap::Args;
use thiserror::Error;
use tracing::warn;

use crate::cache::CacheManager;

pub const DEFAULT_FIXTURES_CACHE_HOURS: f64 = 6.0;
pub const DEFAULT_RESULTS_CACHE_HOURS: f64 = 2.0;
pub const DEFAULT_TABLE_CACHE_HOURS: f64 = 1.0;
pub const DEFAULT_PLAYER_STATS_CACHE_HOURS: f64 = 12.0;
pub const DEFAULT_SEASON: u16 = 2025;

/// Cache directory used when no platform cache directory can be determined
const FALLBACK_CACHE_DIR: &str = "cache";

/// Errors in endpoint configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    MissingUrl(&'static str),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{name} must be a finite number of hours, got {value}")]
    InvalidHours { name: &'static str, value: f64 },
}

/// Endpoint URLs and per-resource maximum cache ages
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Fixtures (upcoming matches) endpoint
    #[arg(long, env = "FIXTURES_API_URL", hide_env_values = true)]
    pub fixtures_url: Option<String>,

    /// Recent results endpoint
    #[arg(long, env = "RESULTS_API_URL", hide_env_values = true)]
    pub results_url: Option<String>,

    /// League table endpoint
    #[arg(long, env = "LEAGUE_TABLE_API_URL", hide_env_values = true)]
    pub league_table_url: Option<String>,

    /// Champions League table endpoint
    #[arg(long, env = "CHAMPIONS_LEAGUE_TABLE_URL", hide_env_values = true)]
    pub champions_league_table_url: Option<String>,

    /// Player stats base URL; the player id and `/stats` are appended
    #[arg(long, env = "PLAYER_STATS_API_URL", hide_env_values = true)]
    pub player_stats_url: Option<String>,

    #[arg(long, env = "FIXTURES_CACHE_HOURS", default_value_t = DEFAULT_FIXTURES_CACHE_HOURS)]
    pub fixtures_cache_hours: f64,

    #[arg(long, env = "RESULTS_CACHE_HOURS", default_value_t = DEFAULT_RESULTS_CACHE_HOURS)]
    pub results_cache_hours: f64,

    #[arg(long, env = "TABLE_CACHE_HOURS", default_value_t = DEFAULT_TABLE_CACHE_HOURS)]
    pub table_cache_hours: f64,

    #[arg(long, env = "PLAYER_STATS_CACHE_HOURS", default_value_t = DEFAULT_PLAYER_STATS_CACHE_HOURS)]
    pub player_stats_cache_hours: f64,

    /// Season used for player stats
    #[arg(long, env = "SEASON", default_value_t = DEFAULT_SEASON)]
    pub season: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixtures_url: None,
            results_url: None,
            league_table_url: None,
            champions_league_table_url: None,
            player_stats_url: None,
            fixtures_cache_hours: DEFAULT_FIXTURES_CACHE_HOURS,
            results_cache_hours: DEFAULT_RESULTS_CACHE_HOURS,
            table_cache_hours: DEFAULT_TABLE_CACHE_HOURS,
            player_stats_cache_hours: DEFAULT_PLAYER_STATS_CACHE_HOURS,
            season: DEFAULT_SEASON,
        }
    }
}

impl Settings {
    /// Rejects NaN and infinite cache lifetimes. Zero or negative is allowed and means "always refetch".
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hours = [
            ("FIXTURES_CACHE_HOURS", self.fixtures_cache_hours),
            ("RESULTS_CACHE_HOURS", self.results_cache_hours),
            ("TABLE_CACHE_HOURS", self.table_cache_hours),
            ("PLAYER_STATS_CACHE_HOURS", self.player_stats_cache_hours),
        ];
        for (name, value) in hours {
            if !value.is_finite() {
                return Err(ConfigError::InvalidHours { name, value });
            }
        }
        Ok(())
    }
}

/// Picks the cache directory: explicit override, then the platform cache dir, then `./cache`
pub fn cache_manager(cache_dir: Option<PathBuf>) -> CacheManager {
    if let Some(dir) = cache_dir {
        return CacheManager::with_dir(dir);
    }
    CacheManager::new().unwrap_or_else(|| {
        warn!(
            fallback = FALLBACK_CACHE_DIR,
            "no platform cache directory, using relative cache directory"
        );
        CacheManager::with_dir(PathBuf::from(FALLBACK_CACHE_DIR))
    })
}
