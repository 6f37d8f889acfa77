use std::collections::BTreeSet;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::log;

use crate::field_extractor::{envelope, envelope_list, is_truthy};
use crate::models::TeamRef;
use crate::rest_client::RestClient;

const ENVELOPE: [&str; 2] = ["response", "data"];

pub struct TeamService;

impl TeamService {
    /// Team entries of a league/season. Falls back to the standings endpoint
    /// when the teams endpoint yields nothing usable.
    pub async fn list_teams(client: &RestClient<'_>, league_id: i64, season: i64) -> Result<Vec<Value>> {
        let endpoints = &client.config().endpoints;
        let params = [("league", league_id.to_string()), ("season", season.to_string())];

        let teams = envelope_list(&client.get(&endpoints.teams, &params).await?, &ENVELOPE);
        if !teams.is_empty() {
            log::info!("[TEAMS] {} teams from {}", teams.len(), endpoints.teams);
            return Ok(teams);
        }

        log::warn!("[TEAMS] {} returned no teams, trying {}", endpoints.teams, endpoints.standings);
        let standings = client.get(&endpoints.standings, &params).await?;
        let teams = teams_from_standings(envelope(&standings, &ENVELOPE));
        log::info!("[TEAMS] {} teams from {}", teams.len(), endpoints.standings);
        Ok(teams)
    }

    pub async fn get_all_team_ids(client: &RestClient<'_>, league_id: i64, season: i64) -> Result<Vec<i64>> {
        let teams = TeamService::list_teams(client, league_id, season).await?;
        Ok(team_ids(&teams))
    }
}

/// Rebuilds `{"team": {...}}` entries from a standings payload.
///
/// Blocks hold their groups either under `league.standings` or directly under
/// `standings`; each group is a list of rows carrying a `team` object.
pub fn teams_from_standings(data: Option<&Value>) -> Vec<Value> {
    data.and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(standing_groups)
        .flatten()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|row| row.get("team"))
        .filter(|team| team.is_object() && is_truthy(team))
        .map(|team| json!({ "team": team }))
        .collect()
}

fn standing_groups(block: &Value) -> Option<&Vec<Value>> {
    let groups = match block.get("league") {
        Some(league) if league.is_object() && is_truthy(league) => league.get("standings"),
        _ => block.get("standings"),
    };
    groups.and_then(Value::as_array)
}

/// Nested `team` object first, then a flat entry carrying both `id` and `name`.
pub fn extract_team_id_and_name(entry: &Value) -> Option<TeamRef> {
    if let Some(team) = entry.get("team").filter(|e| e.is_object()) {
        return Some(TeamRef::from_object(team));
    }
    let flat = entry.as_object()?;
    if flat.contains_key("id") && flat.contains_key("name") {
        Some(TeamRef::from_object(entry))
    } else {
        None
    }
}

/// Sorted, unique numeric ids of `teams`. Entries without a usable id are dropped.
pub fn team_ids(teams: &[Value]) -> Vec<i64> {
    teams.iter()
        .filter_map(extract_team_id_and_name)
        .filter_map(|e| {
            let id = e.numeric_id();
            log::debug!("[TEAMS] {:?} -> {:?}", e.name, id);
            id
        })
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect()
}
