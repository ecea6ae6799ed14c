//! Shared test utilities for the secpol workspace.
//!
//! Lives in its own crate because `xtask` calls `normalize_report` at runtime, outside
//! any `#[cfg(test)]` module.

use serde_json::Value;

const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Normalize the fields of a report that change from run to run.
///
/// `tool.version` is only replaced on the root object, and only when it looks like a
/// report envelope (`schema`, `tool`, `verdict`, `policies`). Timestamps are replaced at
/// any depth.
pub fn normalize_report(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "policies"]
            .iter()
            .all(|key| obj.contains_key(*key));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(slot) = map.get_mut(key) {
                    *slot = Value::String("__TIMESTAMP__".to_string());
                }
            }
            map.values_mut().for_each(normalize_timestamps);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_timestamps),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_version_and_timestamps_are_replaced() {
        let input = json!({
            "schema": "secpol.report.v1",
            "tool": { "name": "secpol", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "fail",
            "policies": [
                { "id": "disa_stig", "name": "STIG", "issues": [] }
            ],
            "data": { "policies_enabled": 1 }
        });

        let result = normalize_report(input);
        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "secpol");
        assert_eq!(result["started_at"], "__TIMESTAMP__");
        assert_eq!(result["finished_at"], "__TIMESTAMP__");
        assert_eq!(result["data"]["policies_enabled"], 1);
    }

    #[test]
    fn non_envelope_keeps_its_version() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "nested": [ { "started_at": "2026-01-01T00:00:00Z" } ]
        });

        let result = normalize_report(input);
        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["nested"][0]["started_at"], "__TIMESTAMP__");
    }
}
