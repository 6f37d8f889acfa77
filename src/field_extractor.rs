//! Safe lookups over provider JSON whose shape is only loosely known.

use serde_json::Value;

use crate::config_handler::FieldPaths;

/// Walks `path` through nested objects. Absent when a key is missing, an
/// intermediate value is not an object, or the value found is `null`.
pub fn dig<'a, S: AsRef<str>>(obj: &'a Value, path: &[S]) -> Option<&'a Value> {
    path.iter()
        .try_fold(obj, |cur, key| cur.as_object()?.get(key.as_ref()))
        .filter(|e| !e.is_null())
}

/// Payload under the first envelope key present, in priority order.
/// A key that is present wins even if its value is `null`.
pub fn envelope<'a>(js: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let obj = js.as_object()?;
    keys.iter().find_map(|key| obj.get(*key))
}

/// Same as [`envelope`] but only accepts a list; anything else is empty.
pub fn envelope_list(js: &Value, keys: &[&str]) -> Vec<Value> {
    envelope(js, keys)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text of a scalar for a CSV cell. Strings are unquoted.
pub fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureFields<'a> {
    pub status_short: Option<&'a Value>,
    pub fixture_id: Option<&'a Value>,
    pub fixture_date: Option<&'a Value>,
    pub home_id: Option<&'a Value>,
    pub home_name: Option<&'a Value>,
    pub away_id: Option<&'a Value>,
    pub away_name: Option<&'a Value>,
    pub goals_home: Option<&'a Value>,
    pub goals_away: Option<&'a Value>,
}

pub fn extract_basic_fields<'a>(fixture: &'a Value, paths: &FieldPaths) -> FixtureFields<'a> {
    FixtureFields {
        status_short: dig(fixture, &paths.status_short),
        fixture_id: dig(fixture, &paths.fixture_id),
        fixture_date: dig(fixture, &paths.fixture_date),
        home_id: dig(fixture, &paths.home_id),
        home_name: dig(fixture, &paths.home_name),
        away_id: dig(fixture, &paths.away_id),
        away_name: dig(fixture, &paths.away_name),
        goals_home: dig(fixture, &paths.goals_home),
        goals_away: dig(fixture, &paths.goals_away),
    }
}
