use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::log;

use crate::config_handler::Config;
use crate::csv_writer::CsvSink;
use crate::field_extractor::is_truthy;
use crate::fixture_service::FixtureService;
use crate::rest_client::RestClient;
use crate::row_builder::RowBuilder;
use crate::team_service::TeamService;

/// Neither the teams nor the standings endpoint produced a single team id.
/// Usually a wrong league/season, endpoint path or credential.
#[derive(Debug, Error)]
#[error("No team ids found for league {league_id} season {season}. Check ENDPOINT_TEAMS ({teams_endpoint}), ENDPOINT_STANDINGS ({standings_endpoint}) and your credentials.")]
pub struct NoTeamsFound {
    pub league_id: i64,
    pub season: i64,
    pub teams_endpoint: String,
    pub standings_endpoint: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub teams: usize,
    pub fixtures: usize,
    pub rows: usize,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} teams, {} fixtures, {} rows)", self.path.display(), self.teams, self.fixtures, self.rows)
    }
}

pub struct FetchService;

impl FetchService {
    pub async fn run(config: &Config) -> Result<RunSummary> {
        FetchService::run_on(config, Local::now().date_naive()).await
    }

    /// Teams → fixtures → statistics, one row per finished fixture and team,
    /// written to the file dated `date`. A failed call aborts the run and
    /// leaves the rows written so far on disk.
    pub async fn run_on(config: &Config, date: NaiveDate) -> Result<RunSummary> {
        let before = Instant::now();
        let client = RestClient::new(config)?;
        let out_dir = Path::new(&config.out_dir);
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("[FETCH] Could not create {}", out_dir.display()))?;

        let team_ids = TeamService::get_all_team_ids(&client, config.league_id, config.season).await?;
        if team_ids.is_empty() {
            return Err(NoTeamsFound {
                league_id: config.league_id,
                season: config.season,
                teams_endpoint: config.endpoints.teams.clone(),
                standings_endpoint: config.endpoints.standings.clone(),
            }.into());
        }
        log::info!("[FETCH] Teams {:?}", team_ids);

        let mut sink = CsvSink::create(out_dir, date)?;
        let builder = RowBuilder::new(config);
        let stats_sleep = Duration::from_millis(config.stats_sleep_ms);
        let mut fixtures_seen = 0;

        for team_id in &team_ids {
            let fixtures = FixtureService::list_fixtures_by_team(
                &client, config.league_id, config.season, *team_id, &config.from_date, &config.to_date,
            ).await?;

            for fixture in &fixtures {
                let Some(fixture_id) = fixture_id_of(fixture) else {
                    log::debug!("[FETCH] Skipping fixture without id for team {team_id}");
                    continue;
                };
                fixtures_seen += 1;
                let statistics = FixtureService::fixture_statistics(&client, fixture_id).await?;
                if let Some(row) = builder.to_row(fixture, &statistics, *team_id) {
                    sink.write(&row)?;
                }
                tokio::time::sleep(stats_sleep).await;
            }
        }

        let rows = sink.rows();
        let path = sink.finish()?;
        let summary = RunSummary { path, teams: team_ids.len(), fixtures: fixtures_seen, rows };
        log::info!("[FETCH] OK: {summary} {:.2?}", before.elapsed());
        Ok(summary)
    }
}

/// `fixture.id`, else a top-level `id`. Falsy ids count as missing.
fn fixture_id_of(fixture: &Value) -> Option<&Value> {
    fixture.get("fixture")
        .and_then(|e| e.get("id"))
        .filter(|e| is_truthy(e))
        .or_else(|| fixture.get("id"))
        .filter(|e| is_truthy(e))
}
