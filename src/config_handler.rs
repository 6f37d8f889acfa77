use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::str::FromStr;
use tracing::log;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Endpoints {
    #[serde(default="default_fixtures")]
    pub fixtures: String,
    #[serde(default="default_fixture_stats")]
    pub fixture_stats: String,
    #[serde(default="default_teams")]
    pub teams: String,
    #[serde(default="default_standings")]
    pub standings: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            fixtures: default_fixtures(),
            fixture_stats: default_fixture_stats(),
            teams: default_teams(),
            standings: default_standings(),
        }
    }
}

/// Labels the statistics resolver looks for, as the provider spells them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatLabels {
    #[serde(default="default_corners")]
    pub corners: String,
    #[serde(default="default_yellow")]
    pub yellow: String,
    #[serde(default="default_red")]
    pub red: String,
}

impl Default for StatLabels {
    fn default() -> Self {
        StatLabels {
            corners: default_corners(),
            yellow: default_yellow(),
            red: default_red(),
        }
    }
}

/// Where each semantic fixture field lives inside a provider's fixture object.
/// Every path is a list of object keys, outermost first.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FieldPaths {
    pub status_short: Vec<String>,
    pub fixture_id: Vec<String>,
    pub fixture_date: Vec<String>,
    pub home_id: Vec<String>,
    pub home_name: Vec<String>,
    pub away_id: Vec<String>,
    pub away_name: Vec<String>,
    pub goals_home: Vec<String>,
    pub goals_away: Vec<String>,
}

impl Default for FieldPaths {
    fn default() -> Self {
        FieldPaths {
            status_short: path(&["fixture", "status", "short"]),
            fixture_id: path(&["fixture", "id"]),
            fixture_date: path(&["fixture", "date"]),
            home_id: path(&["teams", "home", "id"]),
            home_name: path(&["teams", "home", "name"]),
            away_id: path(&["teams", "away", "id"]),
            away_name: path(&["teams", "away", "name"]),
            goals_home: path(&["goals", "home"]),
            goals_away: path(&["goals", "away"]),
        }
    }
}

fn path(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|e| e.to_string()).collect()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default="default_league_id")]
    pub league_id: i64,
    #[serde(default="default_season")]
    pub season: i64,
    #[serde(default="default_from_date")]
    pub from_date: String,
    #[serde(default="default_to_date")]
    pub to_date: String,

    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default="default_auth_header_name")]
    pub auth_header_name: String,
    #[serde(default="default_auth_header_type")]
    pub auth_header_type: String,

    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub stat_labels: StatLabels,
    #[serde(default)]
    pub field_paths: FieldPaths,

    #[serde(default="default_out_dir")]
    pub out_dir: String,
    #[serde(default="default_stats_sleep")]
    pub stats_sleep_ms: u64,
    #[serde(default="default_retry_backoff")]
    pub retry_backoff_ms: u64,
    #[serde(default="default_retry_attempts")]
    pub retry_attempts: u32,
}

fn default_league_id() -> i64 {
    262
}

fn default_season() -> i64 {
    2025
}

fn default_from_date() -> String {
    "2025-07-01".to_string()
}

fn default_to_date() -> String {
    "2025-12-20".to_string()
}

fn default_auth_header_name() -> String {
    "Authorization".to_string()
}

fn default_auth_header_type() -> String {
    "Bearer".to_string()
}

fn default_fixtures() -> String {
    "/fixtures".to_string()
}

fn default_fixture_stats() -> String {
    "/fixtures/statistics".to_string()
}

fn default_teams() -> String {
    "/teams".to_string()
}

fn default_standings() -> String {
    "/standings".to_string()
}

fn default_corners() -> String {
    "Corner Kicks".to_string()
}

fn default_yellow() -> String {
    "Yellow Cards".to_string()
}

fn default_red() -> String {
    "Red Cards".to_string()
}

fn default_out_dir() -> String {
    "data".to_string()
}

fn default_stats_sleep() -> u64 {
    400
}

fn default_retry_backoff() -> u64 {
    2000
}

fn default_retry_attempts() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Config {
            league_id: default_league_id(),
            season: default_season(),
            from_date: default_from_date(),
            to_date: default_to_date(),
            base_url: String::new(),
            api_key: String::new(),
            auth_header_name: default_auth_header_name(),
            auth_header_type: default_auth_header_type(),
            endpoints: Endpoints::default(),
            stat_labels: StatLabels::default(),
            field_paths: FieldPaths::default(),
            out_dir: default_out_dir(),
            stats_sleep_ms: default_stats_sleep(),
            retry_backoff_ms: default_retry_backoff(),
            retry_attempts: default_retry_attempts(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Config> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("[CONFIG] Unable to read {path}"))?;
        serde_json::from_str(&data)
            .with_context(|| format!("[CONFIG] Could not parse JSON at {path}"))
    }

    /// Overlays environment variables on top of the current values.
    /// `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, target: &mut String| {
            if let Some(value) = lookup(key) {
                *target = value;
            }
        };
        text("FROM_DATE", &mut self.from_date);
        text("TO_DATE", &mut self.to_date);
        text("SPORTAPI_BASE_URL", &mut self.base_url);
        text("SPORTAPI_KEY", &mut self.api_key);
        text("AUTH_HEADER_NAME", &mut self.auth_header_name);
        text("AUTH_HEADER_TYPE", &mut self.auth_header_type);
        text("ENDPOINT_FIXTURES", &mut self.endpoints.fixtures);
        text("ENDPOINT_FIXTURE_STATS", &mut self.endpoints.fixture_stats);
        text("ENDPOINT_TEAMS", &mut self.endpoints.teams);
        text("ENDPOINT_STANDINGS", &mut self.endpoints.standings);
        text("STAT_LABEL_CORNERS", &mut self.stat_labels.corners);
        text("STAT_LABEL_YELLOW", &mut self.stat_labels.yellow);
        text("STAT_LABEL_RED", &mut self.stat_labels.red);
        text("OUT_DIR", &mut self.out_dir);

        if let Some(v) = lookup("LEAGUE_ID") {
            self.league_id = parse_env("LEAGUE_ID", &v)?;
        }
        if let Some(v) = lookup("SEASON") {
            self.season = parse_env("SEASON", &v)?;
        }
        if let Some(v) = lookup("STATS_SLEEP_MS") {
            self.stats_sleep_ms = parse_env("STATS_SLEEP_MS", &v)?;
        }
        if let Some(v) = lookup("RETRY_BACKOFF_MS") {
            self.retry_backoff_ms = parse_env("RETRY_BACKOFF_MS", &v)?;
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse::<T>()
        .map_err(|e| anyhow!("[CONFIG] {key}={raw:?} is not a valid number: {e}"))
}

pub fn get_config() -> Result<Config> {
    let mut result = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::from_file(&path)?,
        Err(_) => Config::default(),
    };
    result.apply_env(|key| std::env::var(key).ok())?;
    log::info!("[CONFIG] league {} season {} {}..{} via {}",
        result.league_id, result.season, result.from_date, result.to_date, result.base_url);
    Ok(result)
}
