use super::{stable_json_bytes, StableJsonOptions};
use serde_json::json;

#[test]
fn stable_json_sorts_nested_keys() {
    let value = json!({"b": {"z": 1, "a": 2}, "a": [{"y": 1, "x": 2}]});
    let bytes = stable_json_bytes(&value, &StableJsonOptions::default()).expect("stable json");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"a":[{"x":2,"y":1}],"b":{"a":2,"z":1}}"#
    );
}

#[test]
fn stable_json_drops_only_root_level_ignored_keys() {
    let value = json!({"rabbit_version": "3.12", "nested": {"rabbit_version": "kept"}});
    let options = StableJsonOptions {
        ignore_root_keys: ["rabbit_version".to_string()].into_iter().collect(),
    };
    let bytes = stable_json_bytes(&value, &options).expect("stable json");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"nested":{"rabbit_version":"kept"}}"#
    );
}
