use serde_json::{json, Value};

pub fn team(id: i64, name: &str) -> Value {
    json!({ "team": { "id": id, "name": name }, "venue": { "city": "CDMX" } })
}

pub fn fixture(id: i64, status: &str, home: (i64, &str), away: (i64, &str), goals: (i64, i64)) -> Value {
    json!({
        "fixture": { "id": id, "date": "2025-08-10T19:00:00+00:00", "status": { "long": "Match Finished", "short": status } },
        "league": { "id": 262, "season": 2025 },
        "teams": { "home": { "id": home.0, "name": home.1 }, "away": { "id": away.0, "name": away.1 } },
        "goals": { "home": goals.0, "away": goals.1 }
    })
}

/// API-Football style entry: nested team, `type`/`value` pairs, string numbers.
pub fn team_statistics(team_id: i64, corners: &str, yellow: i64, red: Value) -> Value {
    json!({
        "team": { "id": team_id },
        "statistics": [
            { "type": "Shots on Goal", "value": 5 },
            { "type": "Corner Kicks", "value": corners },
            { "type": "Ball Possession", "value": "55%" },
            { "type": "Yellow Cards", "value": yellow },
            { "type": "Red Cards", "value": red }
        ]
    })
}
