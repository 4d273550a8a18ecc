//! Upstream football data
//!
//! The resources the bot relays (fixtures, results, tables, player stats)
//! and the squad roster used to resolve player stats requests.

pub mod players;
pub mod resources;

pub use players::{find_player, squad, Player, PlayerLookupError};
pub use resources::{PlayerStatsQuery, Resource};
