use serde_json::Value;

use crate::config_handler::{Config, FieldPaths, StatLabels};
use crate::field_extractor::{as_text, extract_basic_fields, is_truthy};
use crate::models::{CsvRow, MatchStatus, Perspective};
use crate::stats_service::{get_stat, to_int};

pub struct RowBuilder<'a> {
    paths: &'a FieldPaths,
    labels: &'a StatLabels,
}

/// Statistics lists of both sides of one fixture.
#[derive(Default)]
struct SideStats<'a> {
    home: Option<&'a Value>,
    away: Option<&'a Value>,
}

impl<'a> RowBuilder<'a> {
    pub fn new(config: &'a Config) -> RowBuilder<'a> {
        RowBuilder { paths: &config.field_paths, labels: &config.stat_labels }
    }

    /// Row for `fixture` seen from `team_id`, or `None` when the match has not concluded.
    pub fn to_row(&self, fixture: &Value, statistics: &[Value], team_id: i64) -> Option<CsvRow> {
        let b = extract_basic_fields(fixture, self.paths);
        b.status_short.and_then(Value::as_str)?.parse::<MatchStatus>().ok()?;

        let is_home = b.home_id.and_then(Value::as_i64) == Some(team_id);
        let (goals_for, goals_against) = if is_home {
            (b.goals_home, b.goals_away)
        } else {
            (b.goals_away, b.goals_home)
        };

        let sides = split_sides(statistics, b.home_id, b.away_id);
        let (own, opponent) = if is_home {
            (sides.home, sides.away)
        } else {
            (sides.away, sides.home)
        };
        let stat = |side: Option<&Value>, label: &str| side.and_then(|e| get_stat(e, label));

        let corners_for = stat(own, &self.labels.corners);
        let corners_against = stat(opponent, &self.labels.corners);

        Some(CsvRow {
            fixture_id: b.fixture_id.and_then(as_text),
            fecha: b.fixture_date.and_then(as_text),
            home: b.home_name.and_then(as_text),
            away: b.away_name.and_then(as_text),
            condicion: if is_home { Perspective::Home } else { Perspective::Away },
            goles_for: goals_for.and_then(to_int),
            goles_against: goals_against.and_then(to_int),
            corners_for,
            corners_against,
            corners_total: corners_for.zip(corners_against).and_then(|(a, b)| a.checked_add(b)),
            amarillas_for: stat(own, &self.labels.yellow),
            amarillas_against: stat(opponent, &self.labels.yellow),
            rojas_for: stat(own, &self.labels.red),
            rojas_against: stat(opponent, &self.labels.red),
        })
    }
}

/// Assigns each statistics entry to a side by its team id. Later entries
/// for the same side replace earlier ones.
fn split_sides<'a>(statistics: &'a [Value], home_id: Option<&Value>, away_id: Option<&Value>) -> SideStats<'a> {
    let mut sides = SideStats::default();
    for entry in statistics {
        let Some(tid) = entry_team_id(entry) else { continue };
        let stats = entry.get("statistics").or_else(|| entry.get("stats"));
        if Some(tid) == home_id {
            sides.home = stats;
        }
        if Some(tid) == away_id {
            sides.away = stats;
        }
    }
    sides
}

fn entry_team_id(entry: &Value) -> Option<&Value> {
    entry.get("team")
        .and_then(|e| e.get("id"))
        .filter(|e| is_truthy(e))
        .or_else(|| entry.get("team_id"))
        .filter(|e| !e.is_null())
}
