use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct StableJsonOptions {
    /// Keys dropped from the top-level object only.
    pub ignore_root_keys: BTreeSet<String>,
}

/// Canonical JSON bytes: object keys sorted at every depth, array order kept.
pub fn stable_json_bytes(value: &Value, options: &StableJsonOptions) -> serde_json::Result<Vec<u8>> {
    let normalized = match value {
        Value::Object(object) => Value::Object(sorted_object(
            object
                .iter()
                .filter(|(key, _)| !options.ignore_root_keys.contains(key.as_str())),
        )),
        other => normalize_value(other),
    };
    serde_json::to_vec(&normalized)
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(sorted_object(object.iter())),
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        _ => value.clone(),
    }
}

fn sorted_object<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> Map<String, Value> {
    let ordered = entries
        .map(|(key, value)| (key.clone(), normalize_value(value)))
        .collect::<BTreeMap<_, _>>();
    ordered.into_iter().collect()
}

#[cfg(test)]
#[path = "stable_json_test.rs"]
mod tests;
