use fixture_stats_rs::{rest_client::RestClient, team_service::TeamService};
use serde_json::json;

use crate::common::{external_server::ExternalServer, payloads, test_config};

mod common;

#[tokio::test]
async fn test_teams_endpoint_is_used_when_populated() -> Result<(), Box<dyn std::error::Error>> {
    // Given
    let mut server = ExternalServer::new();
    server.start().await;
    server.set_teams(json!({ "response": [
        payloads::team(2280, "Pumas"),
        payloads::team(2279, "Cruz Azul"),
        { "id": 2281, "name": "Tigres" }
    ]})).await;
    let config = test_config(&server.get_url(), "unused");
    let client = RestClient::new(&config)?;

    // When
    let ids = TeamService::get_all_team_ids(&client, 262, 2025).await?;

    // Then
    assert_eq!(ids, vec![2279, 2280, 2281]);
    assert!(server.calls("standings").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_falls_back_to_nested_standings() -> Result<(), Box<dyn std::error::Error>> {
    // Given - teams endpoint answers with an empty list
    let mut server = ExternalServer::new();
    server.start().await;
    server.set_teams(json!({ "response": [] })).await;
    server.set_standings(json!({ "response": [{
        "league": { "id": 262, "season": 2025, "standings": [
            [
                { "rank": 1, "team": { "id": 16, "name": "America" }, "points": 30 },
                { "rank": 2, "team": { "id": 2279, "name": "Cruz Azul" }, "points": 28 }
            ],
            [
                { "rank": 1, "team": { "id": 2280, "name": "Pumas" }, "points": 25 },
                { "rank": 2, "team": { "id": 16, "name": "America" }, "points": 30 }
            ]
        ]}
    }]})).await;
    let config = test_config(&server.get_url(), "unused");
    let client = RestClient::new(&config)?;

    // When
    let teams = TeamService::list_teams(&client, 262, 2025).await?;
    let ids = TeamService::get_all_team_ids(&client, 262, 2025).await?;

    // Then
    assert_eq!(teams.len(), 4);
    assert_eq!(teams[0], json!({ "team": { "id": 16, "name": "America" } }));
    assert_eq!(ids, vec![16, 2279, 2280]);
    let calls = server.calls("standings").await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].query.get("league").map(String::as_str), Some("262"));
    Ok(())
}

#[tokio::test]
async fn test_non_list_teams_payload_falls_back() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = ExternalServer::new();
    server.start().await;
    server.set_teams(json!({ "data": { "message": "endpoint not in plan" } })).await;
    server.set_standings(json!({ "data": [
        { "standings": [[ { "team": { "id": "45", "name": "Santos" } } ]] }
    ]})).await;
    let config = test_config(&server.get_url(), "unused");

    let ids = TeamService::get_all_team_ids(&RestClient::new(&config)?, 262, 2025).await?;

    assert_eq!(ids, vec![45]);
    Ok(())
}

#[tokio::test]
async fn test_nothing_found_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = ExternalServer::new();
    server.start().await;
    server.set_teams(json!({ "response": [] })).await;
    server.set_standings(json!({ "response": [] })).await;
    let config = test_config(&server.get_url(), "unused");

    let ids = TeamService::get_all_team_ids(&RestClient::new(&config)?, 262, 2025).await?;

    assert!(ids.is_empty());
    Ok(())
}
