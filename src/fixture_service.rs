use anyhow::Result;
use serde_json::Value;
use tracing::log;

use crate::field_extractor::{as_text, envelope_list};
use crate::rest_client::RestClient;

pub struct FixtureService;

impl FixtureService {
    pub async fn list_fixtures_by_team(
        client: &RestClient<'_>,
        league_id: i64,
        season: i64,
        team_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<Value>> {
        let mut params = vec![
            ("league", league_id.to_string()),
            ("season", season.to_string()),
            ("team", team_id.to_string()),
        ];
        if !from.is_empty() {
            params.push(("from", from.to_string()));
        }
        if !to.is_empty() {
            params.push(("to", to.to_string()));
        }
        let js = client.get(&client.config().endpoints.fixtures, &params).await?;
        let fixtures = envelope_list(&js, &["response", "data", "fixtures"]);
        log::info!("[FIXTURES] Team {team_id}: {} fixtures", fixtures.len());
        Ok(fixtures)
    }

    /// Per-team statistics entries of one fixture, usually one for each side.
    pub async fn fixture_statistics(client: &RestClient<'_>, fixture_id: &Value) -> Result<Vec<Value>> {
        let params = [("fixture", as_text(fixture_id).unwrap_or_default())];
        let js = client.get(&client.config().endpoints.fixture_stats, &params).await?;
        Ok(envelope_list(&js, &["response", "data", "statistics"]))
    }
}
