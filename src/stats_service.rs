use serde_json::{Map, Value};

/// Keys an entry may carry its label under, highest priority first.
const LABEL_KEYS: [&str; 3] = ["type", "name", "code"];

/// Looks up one statistic by label.
///
/// A list is scanned in order for the first entry whose label, trimmed and
/// lower-cased, equals the target; that entry's `value` decides the result
/// even when it is not numeric. A plain object is read as `label -> value`.
pub fn get_stat(statistics: &Value, label: &str) -> Option<i64> {
    match statistics {
        Value::Array(entries) => {
            let target = label.trim().to_lowercase();
            entries.iter()
                .filter_map(Value::as_object)
                .find(|entry| entry_label(entry).map(|e| e.trim().to_lowercase() == target).unwrap_or(false))
                .and_then(|entry| entry.get("value"))
                .and_then(to_int)
        },
        Value::Object(map) => map.get(label).and_then(to_int),
        _ => None,
    }
}

fn entry_label(entry: &Map<String, Value>) -> Option<&str> {
    LABEL_KEYS.iter()
        .filter_map(|key| entry.get(*key).and_then(Value::as_str))
        .find(|e| !e.is_empty())
}

/// Integers pass through, floats truncate, strings are parsed. Never fails.
pub fn to_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64()
            .or_else(|| n.as_f64().filter(|e| e.is_finite()).map(|e| e.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
