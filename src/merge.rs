use serde_json::Value;

/// Merge the named server-list object of `incoming` into `existing`.
///
/// Entries already present in `existing` win; `incoming` only fills gaps.
/// This keeps a user's local server definitions (credentials, overridden
/// commands) across installs while still picking up newly shipped servers.
/// Top-level keys outside `list_key` follow the same rule.
pub fn merge_server_lists(existing: Value, incoming: Value, list_key: &str) -> Value {
    let Value::Object(mut existing_map) = existing else {
        // Nothing local worth preserving; take the incoming document whole.
        return incoming;
    };
    let Value::Object(incoming_map) = incoming else {
        return Value::Object(existing_map);
    };

    for (key, incoming_val) in incoming_map {
        match existing_map.remove(&key) {
            Some(Value::Object(existing_obj)) if key == list_key => {
                let merged = match incoming_val {
                    Value::Object(incoming_obj) => {
                        merge_objects(existing_obj, incoming_obj)
                    }
                    _ => existing_obj,
                };
                existing_map.insert(key, Value::Object(merged));
            }
            Some(existing_val) => {
                existing_map.insert(key, existing_val);
            }
            None => {
                existing_map.insert(key, incoming_val);
            }
        }
    }
    Value::Object(existing_map)
}

/// Union of two objects where `existing` wins on conflict. Server entries
/// are atomic; there is no per-entry recursion.
fn merge_objects(
    existing: serde_json::Map<String, Value>,
    incoming: serde_json::Map<String, Value>,
) -> serde_json::Map<String, Value> {
    let mut merged = incoming;
    for (key, existing_val) in existing {
        merged.insert(key, existing_val);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn disjoint_servers_union() {
        let existing = json(r#"{"mcpServers": {"local": {"command": "a"}}}"#);
        let incoming = json(r#"{"mcpServers": {"shipped": {"command": "b"}}}"#);
        let merged = merge_server_lists(existing, incoming, "mcpServers");
        assert_eq!(merged["mcpServers"]["local"]["command"], "a");
        assert_eq!(merged["mcpServers"]["shipped"]["command"], "b");
    }

    #[test]
    fn existing_server_wins_on_conflict() {
        let existing = json(r#"{"mcpServers": {"search": {"command": "customized"}}}"#);
        let incoming = json(r#"{"mcpServers": {"search": {"command": "stock"}}}"#);
        let merged = merge_server_lists(existing, incoming, "mcpServers");
        assert_eq!(merged["mcpServers"]["search"]["command"], "customized");
    }

    #[test]
    fn existing_entry_is_kept_whole_not_deep_merged() {
        let existing = json(r#"{"mcpServers": {"search": {"command": "custom"}}}"#);
        let incoming =
            json(r#"{"mcpServers": {"search": {"command": "stock", "args": ["-v"]}}}"#);
        let merged = merge_server_lists(existing, incoming, "mcpServers");
        // The stock entry's extra fields do not leak into the kept one.
        assert_eq!(merged["mcpServers"]["search"].get("args"), None);
    }

    #[test]
    fn missing_list_in_existing_takes_incoming() {
        let existing = json(r#"{"other": true}"#);
        let incoming = json(r#"{"mcpServers": {"shipped": {"command": "b"}}}"#);
        let merged = merge_server_lists(existing, incoming, "mcpServers");
        assert_eq!(merged["mcpServers"]["shipped"]["command"], "b");
        assert_eq!(merged["other"], true);
    }

    #[test]
    fn non_object_existing_takes_incoming_whole() {
        let incoming = json(r#"{"mcpServers": {}}"#);
        let merged = merge_server_lists(Value::Null, incoming.clone(), "mcpServers");
        assert_eq!(merged, incoming);
    }

    #[test]
    fn other_top_level_keys_existing_wins() {
        let existing = json(r#"{"version": 1}"#);
        let incoming = json(r#"{"version": 2, "added": "x"}"#);
        let merged = merge_server_lists(existing, incoming, "mcpServers");
        assert_eq!(merged["version"], 1);
        assert_eq!(merged["added"], "x");
    }

    #[test]
    fn empty_incoming_returns_existing() {
        let existing = json(r#"{"mcpServers": {"local": {}}}"#);
        let merged = merge_server_lists(existing.clone(), json("{}"), "mcpServers");
        assert_eq!(merged, existing);
    }
}
