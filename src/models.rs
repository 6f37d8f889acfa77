use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::log;
use std::fmt::Display;
use std::str::FromStr;

/// Statuses of a concluded match. Anything else is still to be played,
/// live, postponed or abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    FullTime,
    ExtraTime,
    Penalties,
}

impl FromStr for MatchStatus {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FT" => Ok(MatchStatus::FullTime),
            "AET" => Ok(MatchStatus::ExtraTime),
            "PEN" => Ok(MatchStatus::Penalties),
            _ => Err(ParseStringError)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    #[serde(rename = "Local")]
    Home,
    #[serde(rename = "Visitante")]
    Away,
}

impl Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Perspective::Home => write!(f, "Local"),
            Perspective::Away => write!(f, "Visitante"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRef {
    pub id: Option<Value>,
    pub name: Option<String>,
}

impl TeamRef {
    pub fn from_object(team: &Value) -> TeamRef {
        TeamRef {
            id: team.get("id").filter(|e| !e.is_null()).cloned(),
            name: team.get("name").and_then(Value::as_str).map(|e| e.to_string()),
        }
    }

    /// Non-negative integer ids and digit-only strings; anything else is not an id.
    pub fn numeric_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|e| i64::try_from(e).ok()),
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => match s.parse::<i64>() {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("[TEAMS] Dropping team id {s}: {e}");
                    None
                }
            },
            _ => None,
        }
    }
}

/// One exported line: a finished fixture seen from one of its two teams.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub fixture_id: Option<String>,
    pub fecha: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub condicion: Perspective,
    pub goles_for: Option<i64>,
    pub goles_against: Option<i64>,
    pub corners_for: Option<i64>,
    pub corners_against: Option<i64>,
    pub corners_total: Option<i64>,
    pub amarillas_for: Option<i64>,
    pub amarillas_against: Option<i64>,
    pub rojas_for: Option<i64>,
    pub rojas_against: Option<i64>,
}

impl CsvRow {
    pub const HEADER: [&'static str; 14] = [
        "fixture_id", "fecha", "home", "away", "condicion",
        "goles_for", "goles_against",
        "corners_for", "corners_against", "corners_total",
        "amarillas_for", "amarillas_against", "rojas_for", "rojas_against",
    ];
}
