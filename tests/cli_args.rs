//! Integration tests for the matchday binary
//!
//! Each test points the binary at its own cache directory and clears the
//! endpoint variables so the host environment cannot leak in.

use std::process::Output;

use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_VARS: [&str; 5] = [
    "FIXTURES_API_URL",
    "RESULTS_API_URL",
    "LEAGUE_TABLE_API_URL",
    "CHAMPIONS_LEAGUE_TABLE_URL",
    "PLAYER_STATS_API_URL",
];

/// Helper to run the CLI with given args and env, capturing output
async fn run_cli(cache_dir: &TempDir, args: &[&str], env: &[(&str, String)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_matchday"));
    for var in ENDPOINT_VARS {
        command.env_remove(var);
    }
    command
        .env("CACHE_DIR", cache_dir.path())
        .env_remove("RUST_LOG")
        .args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().await.expect("Failed to execute matchday")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[tokio::test]
async fn test_help_flag_exits_successfully() {
    let cache_dir = TempDir::new().unwrap();
    let output = run_cli(&cache_dir, &["--help"], &[]).await;

    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("matchday"), "Help should mention matchday");
    assert!(stdout.contains("fetch"), "Help should mention the fetch command");
    assert!(stdout.contains("cache"), "Help should mention the cache command");
}

#[tokio::test]
async fn test_players_lists_the_squad() {
    let cache_dir = TempDir::new().unwrap();
    let output = run_cli(&cache_dir, &["players"], &[]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cole Palmer"));
    assert!(stdout.contains("2srYA1QS1OhCE45rzou1ZR"));
}

#[tokio::test]
async fn test_unconfigured_endpoint_prints_error_and_exits() {
    let cache_dir = TempDir::new().unwrap();
    let output = run_cli(&cache_dir, &["fetch", "fixtures"], &[]).await;

    assert!(!output.status.success(), "Expected missing URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("FIXTURES_API_URL"),
        "Should name the missing variable: {}",
        stderr
    );
}

#[tokio::test]
async fn test_unknown_player_prints_error_and_exits() {
    let cache_dir = TempDir::new().unwrap();
    let env = [("PLAYER_STATS_API_URL", "http://127.0.0.1:9/players/".to_string())];
    let output = run_cli(&cache_dir, &["fetch", "player", "zola"], &env).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("zola"), "Should mention the query: {}", stderr);
}

#[tokio::test]
async fn test_cache_status_on_empty_cache_reports_missing() {
    let cache_dir = TempDir::new().unwrap();
    let output = run_cli(
        &cache_dir,
        &["cache", "status", "fixtures", "--max-age-hours", "6"],
        &[],
    )
    .await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fixtures: missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_goes_live_then_falls_back_to_cache() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();
    let env = [("FIXTURES_API_URL", format!("{}/fixtures", server.uri()))];

    // First run: the upstream is healthy
    let healthy = Mock::given(method("GET"))
        .and(path("/fixtures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 1}]})))
        .expect(1)
        .mount_as_scoped(&server)
        .await;
    let output = run_cli(&cache_dir, &["fetch", "fixtures"], &env).await;
    drop(healthy);

    assert!(output.status.success());
    let live = stdout_json(&output);
    assert_eq!(live["source"], json!("live"));
    assert_eq!(live["data"], json!({"items": [{"id": 1}]}));
    assert!(cache_dir.path().join("fixtures.json").exists());

    // Second run: forced past the cache, the upstream is down
    Mock::given(method("GET"))
        .and(path("/fixtures"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let output = run_cli(
        &cache_dir,
        &["fetch", "fixtures", "--max-age-hours", "0"],
        &env,
    )
    .await;

    assert!(output.status.success());
    let fallback = stdout_json(&output);
    assert_eq!(fallback["success"], json!(true));
    assert_eq!(fallback["source"], json!("cache"));
    assert_eq!(fallback["data"], json!({"items": [{"id": 1}]}));
    assert!(fallback["cache_age_hours"].is_number());

    let status = run_cli(
        &cache_dir,
        &["cache", "status", "fixtures", "--max-age-hours", "6"],
        &[],
    )
    .await;
    assert!(String::from_utf8_lossy(&status.stdout).contains("fixtures: fresh"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_with_upstream_down_and_no_cache_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let cache_dir = TempDir::new().unwrap();
    let env = [("RESULTS_API_URL", format!("{}/results", server.uri()))];

    let output = run_cli(&cache_dir, &["fetch", "results"], &env).await;

    assert!(!output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["success"], json!(false));
    assert_eq!(result["source"], json!("none"));
    assert_eq!(result["error"], json!("API error: HTTP 503"));
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use matchday::cli::{Cli, Command, FetchTarget};
    use matchday::config::Settings;
    use matchday::data::Resource;

    #[test]
    fn test_cli_fetch_player_by_number() {
        let cli = Cli::parse_from(["matchday", "fetch", "player", "10", "--season", "2024"]);
        let Command::Fetch { target, .. } = cli.command else {
            panic!("expected fetch command");
        };
        let resource = target.resource(&Settings::default()).unwrap();
        assert_eq!(
            resource.cache_key(),
            "player_stats_2srYA1QS1OhCE45rzou1ZR_season_2024"
        );
    }

    #[test]
    fn test_cli_results_target() {
        let cli = Cli::parse_from(["matchday", "fetch", "results"]);
        let Command::Fetch { target, .. } = cli.command else {
            panic!("expected fetch command");
        };
        assert_eq!(target, FetchTarget::Results);
        assert_eq!(
            target.resource(&Settings::default()).unwrap(),
            Resource::RecentResults
        );
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["matchday", "teleport"]).is_err());
    }
}
