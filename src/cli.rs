//! Command-line interface parsing for matchday
//!
//! This module handles parsing of CLI arguments using clap and resolves
//! fetch targets into upstream resources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{ConfigError, Settings};
use crate::data::{find_player, PlayerLookupError, PlayerStatsQuery, Resource};

/// Error types for CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Player(#[from] PlayerLookupError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// `--max-age-hours` was NaN or infinite
    #[error("Invalid max age: '{0}' hours")]
    InvalidMaxAge(f64),
}

/// matchday - Football fixtures, results, tables and player stats with a stale-tolerant cache
#[derive(Parser, Debug)]
#[command(name = "matchday")]
#[command(about = "Football fixtures, results, tables and player stats through a disk cache")]
#[command(version)]
pub struct Cli {
    /// Directory for cached responses (defaults to the platform cache directory)
    #[arg(long, env = "CACHE_DIR", global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Deadline for a single upstream request
    #[arg(long, global = true, default_value_t = 10, value_name = "SECS")]
    pub timeout_secs: u64,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch one resource and print the result as JSON
    ///
    /// Examples:
    ///   matchday fetch fixtures
    ///   matchday fetch table --champions-league
    ///   matchday fetch player 10 --competition 8
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,

        /// Override the configured maximum cache age; zero or negative forces a live fetch
        #[arg(long, global = true, allow_negative_numbers = true, value_name = "HOURS")]
        max_age_hours: Option<f64>,
    },
    /// Refresh fixtures, results and the league table concurrently
    Warm,
    /// Inspect cached entries
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// List the squad with shirt numbers and upstream ids
    Players,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FetchTarget {
    /// Upcoming matches
    Fixtures,
    /// Recent results
    Results,
    /// League table
    Table {
        /// Show the Champions League table instead
        #[arg(long)]
        champions_league: bool,
    },
    /// Season stats for one player
    Player {
        /// Shirt number, upstream id, or part of the player's name
        query: String,

        /// Restrict stats to one competition id
        #[arg(long)]
        competition: Option<String>,

        /// Season (defaults to the configured season)
        #[arg(long)]
        season: Option<u16>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CacheAction {
    /// Print the stored entry for a key
    Show { key: String },
    /// Report whether the entry for a key is fresh
    Status {
        key: String,

        #[arg(long, allow_negative_numbers = true, value_name = "HOURS")]
        max_age_hours: f64,
    },
}

impl FetchTarget {
    /// Resolves the target into an upstream resource
    ///
    /// # Returns
    /// * `Ok(Resource)` for fixed resources and known players
    /// * `Err(CliError::Player)` if the player query matches nobody or several players
    pub fn resource(&self, settings: &Settings) -> Result<Resource, CliError> {
        match self {
            FetchTarget::Fixtures => Ok(Resource::Fixtures),
            FetchTarget::Results => Ok(Resource::RecentResults),
            FetchTarget::Table { champions_league } => Ok(if *champions_league {
                Resource::ChampionsLeagueTable
            } else {
                Resource::LeagueTable
            }),
            FetchTarget::Player {
                query,
                competition,
                season,
            } => {
                let player = find_player(query)?;
                Ok(Resource::PlayerStats(PlayerStatsQuery {
                    player_id: player.id.to_string(),
                    competition_id: competition.clone(),
                    season: season.unwrap_or(settings.season),
                }))
            }
        }
    }
}

/// Checks an hour value supplied on the command line
pub fn parse_max_age(hours: f64) -> Result<f64, CliError> {
    if hours.is_finite() {
        Ok(hours)
    } else {
        Err(CliError::InvalidMaxAge(hours))
    }
}
