//! Command execution for matchday
//!
//! Resolves parsed CLI commands into cache and fetch operations and prints
//! the outcome. Results go to stdout; logs go to stderr.

use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{duration_to_hours, hours_to_duration, CacheManager, CacheStore};
use crate::cli::{parse_max_age, CacheAction, Cli, CliError, Command, FetchTarget};
use crate::config::{cache_manager, Settings};
use crate::data::{squad, Resource};
use crate::fetch::{CachedFetcher, Endpoint, FetchResult, Freshness};

/// Runs one command
///
/// # Returns
/// * `Ok(true)` if every requested resource produced data
/// * `Ok(false)` if something was unavailable (no live data and no cache)
/// * `Err(CliError)` for configuration or argument problems
pub async fn run(cli: Cli) -> Result<bool, CliError> {
    cli.settings.validate()?;
    let store = cache_manager(cli.cache_dir);
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Command::Fetch {
            target,
            max_age_hours,
        } => fetch(store, timeout, &cli.settings, &target, max_age_hours).await,
        Command::Warm => warm(store, timeout, &cli.settings).await,
        Command::Cache { action } => inspect_cache(&store, &action),
        Command::Players => {
            list_players();
            Ok(true)
        }
    }
}

async fn fetch(
    store: CacheManager,
    timeout: Duration,
    settings: &Settings,
    target: &FetchTarget,
    max_age_hours: Option<f64>,
) -> Result<bool, CliError> {
    let resource = target.resource(settings)?;
    let mut endpoint = resource.endpoint(settings)?;
    if let Some(hours) = max_age_hours {
        endpoint.max_age = hours_to_duration(parse_max_age(hours)?);
    }

    let fetcher = CachedFetcher::new(store).with_timeout(timeout);
    let result = fetcher.fetch_endpoint(&endpoint).await;
    log_freshness(resource.name(), &result);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.success())
}

async fn warm(store: CacheManager, timeout: Duration, settings: &Settings) -> Result<bool, CliError> {
    let mut names = Vec::new();
    let mut endpoints: Vec<Endpoint> = Vec::new();
    for resource in Resource::warm_set() {
        match resource.endpoint(settings) {
            Ok(endpoint) => {
                names.push(resource.name());
                endpoints.push(endpoint);
            }
            Err(err) => warn!(resource = resource.name(), error = %err, "skipping resource"),
        }
    }

    if endpoints.is_empty() {
        warn!("no upstream endpoints configured");
        return Ok(false);
    }

    let fetcher = CachedFetcher::new(store).with_timeout(timeout);
    let results = fetcher.warm(&endpoints).await;

    let mut all_ok = true;
    for (name, result) in names.iter().zip(&results) {
        log_freshness(name, result);
        all_ok &= result.success();
        println!("{}", summary_line(name, result));
    }
    Ok(all_ok)
}

fn inspect_cache(store: &CacheManager, action: &CacheAction) -> Result<bool, CliError> {
    match action {
        CacheAction::Show { key } => match store.load(key) {
            Some(entry) => {
                println!("{}", serde_json::to_string_pretty(&entry)?);
                Ok(true)
            }
            None => {
                println!("no cache entry for '{}'", key);
                Ok(false)
            }
        },
        CacheAction::Status { key, max_age_hours } => {
            let max_age = hours_to_duration(parse_max_age(*max_age_hours)?);
            match store.load(key) {
                Some(entry) => {
                    let state = if entry.is_fresh(max_age) { "fresh" } else { "stale" };
                    println!(
                        "{}: {} (age {:.1}h, written {})",
                        key,
                        state,
                        duration_to_hours(entry.age()),
                        entry.timestamp.to_rfc3339()
                    );
                    Ok(true)
                }
                None => {
                    println!("{}: missing", key);
                    Ok(false)
                }
            }
        }
    }
}

fn list_players() {
    for player in squad() {
        let number = player
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>3}  {:<22} {}", number, player.full_name, player.id);
    }
}

/// One line per warmed resource: `name: live`, `name: cache (2.3h old)` or `name: unavailable (...)`
fn summary_line(name: &str, result: &FetchResult) -> String {
    match result.freshness() {
        Freshness::Live => format!("{}: live", name),
        Freshness::Cached { age } => format!("{}: cache ({:.1}h old)", name, duration_to_hours(age)),
        Freshness::Unavailable { reason } => format!("{}: unavailable ({})", name, reason),
    }
}

fn log_freshness(name: &str, result: &FetchResult) {
    let freshness = result.freshness();
    match &freshness {
        Freshness::Live => info!(resource = name, "live data"),
        Freshness::Cached { .. } => info!(resource = name, notice = %freshness, "cached data"),
        Freshness::Unavailable { reason } => {
            warn!(resource = name, reason = %reason, notice = %freshness, "data unavailable")
        }
    }
}
