//! Upstream resources relayed by the bot
//!
//! Each resource maps to one cache key, one URL and one maximum cache age.

use chrono::Duration;
use reqwest::Url;

use crate::cache::hours_to_duration;
use crate::config::{ConfigError, Settings};
use crate::fetch::Endpoint;

/// A player stats request, optionally narrowed to one competition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatsQuery {
    pub player_id: String,
    pub competition_id: Option<String>,
    pub season: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Fixtures,
    RecentResults,
    LeagueTable,
    ChampionsLeagueTable,
    PlayerStats(PlayerStatsQuery),
}

impl Resource {
    /// Resources refreshed together by a warm-up run
    pub fn warm_set() -> [Resource; 3] {
        [
            Resource::Fixtures,
            Resource::RecentResults,
            Resource::LeagueTable,
        ]
    }

    /// Short name used in output
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Fixtures => "fixtures",
            Resource::RecentResults => "results",
            Resource::LeagueTable => "table",
            Resource::ChampionsLeagueTable => "champions_league_table",
            Resource::PlayerStats(_) => "player_stats",
        }
    }

    /// Key under which the resource is cached
    pub fn cache_key(&self) -> String {
        match self {
            Resource::Fixtures => "fixtures".to_string(),
            Resource::RecentResults => "recent_results".to_string(),
            Resource::LeagueTable => "league_table".to_string(),
            Resource::ChampionsLeagueTable => "champions_league_table".to_string(),
            Resource::PlayerStats(query) => {
                let mut key = format!(
                    "player_stats_{}_season_{}",
                    sanitize_key_part(&query.player_id),
                    query.season
                );
                if let Some(competition_id) = &query.competition_id {
                    key.push_str("_comp_");
                    key.push_str(&sanitize_key_part(competition_id));
                }
                key
            }
        }
    }

    /// Upstream URL, built from the configured endpoints
    pub fn url(&self, settings: &Settings) -> Result<String, ConfigError> {
        match self {
            Resource::Fixtures => required(&settings.fixtures_url, "FIXTURES_API_URL"),
            Resource::RecentResults => required(&settings.results_url, "RESULTS_API_URL"),
            Resource::LeagueTable => {
                required(&settings.league_table_url, "LEAGUE_TABLE_API_URL")
            }
            Resource::ChampionsLeagueTable => required(
                &settings.champions_league_table_url,
                "CHAMPIONS_LEAGUE_TABLE_URL",
            ),
            Resource::PlayerStats(query) => {
                let base = required(&settings.player_stats_url, "PLAYER_STATS_API_URL")?;
                player_stats_url(&base, query)
            }
        }
    }

    /// Maximum age before a cached copy counts as stale
    pub fn max_age(&self, settings: &Settings) -> Duration {
        let hours = match self {
            Resource::Fixtures => settings.fixtures_cache_hours,
            Resource::RecentResults => settings.results_cache_hours,
            Resource::LeagueTable | Resource::ChampionsLeagueTable => settings.table_cache_hours,
            Resource::PlayerStats(_) => settings.player_stats_cache_hours,
        };
        hours_to_duration(hours)
    }

    pub fn endpoint(&self, settings: &Settings) -> Result<Endpoint, ConfigError> {
        Ok(Endpoint {
            url: self.url(settings)?,
            cache_key: self.cache_key(),
            max_age: self.max_age(settings),
        })
    }
}

fn required(url: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(ConfigError::MissingUrl(name)),
    }
}

/// `<base><player_id>/stats` with the season, and the competition when given
fn player_stats_url(base: &str, query: &PlayerStatsQuery) -> Result<String, ConfigError> {
    let raw = format!("{}{}/stats", base, query.player_id);
    let season = query.season.to_string();

    let params: Vec<(&str, &str)> = match &query.competition_id {
        Some(competition_id) => vec![
            ("playerEntryId", query.player_id.as_str()),
            ("competitionId", competition_id.as_str()),
            ("season", season.as_str()),
        ],
        None => vec![("season", season.as_str())],
    };

    Url::parse_with_params(&raw, &params)
        .map(String::from)
        .map_err(|e| ConfigError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
}

/// Replaces characters that are not valid in a cache key with underscores
fn sanitize_key_part(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' => c,
            _ => '_',
        })
        .collect()
}
