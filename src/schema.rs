//! Data model for the project rules configuration (`config.yaml`).
//!
//! The file has one top-level key, `commands`, mapping a command name to a
//! spec whose `rules` field has changed shape across releases:
//!
//! - **Legacy**: `rules` is a bare list of rule names.
//! - **Current**: `rules` is a mapping with `standard` and/or `custom` lists.
//!
//! Old files carry no version marker, so the two schemas are distinguished
//! purely by the YAML node kind of `rules`. [`RuleSet`] is the tagged form of
//! that distinction; its `Deserialize` impl inspects the node kind directly
//! rather than relying on serde's untagged resolution, so a `rules` value of
//! some unexpected shape degrades to [`RuleSet::Other`] instead of failing
//! the whole document.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Parsed `config.yaml`: the per-command rule configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulesConfig {
    /// Command name → command spec. Absent or null means no commands.
    #[serde(default)]
    pub commands: Option<BTreeMap<String, CommandSpec>>,
}

/// A single command entry. Keys other than `rules` are tolerated and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

/// The shape of a command's `rules` field.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSet {
    /// Pre-split schema: a flat, ordered list of rule names.
    Legacy(Vec<String>),
    /// Current schema: separate `standard` and `custom` rule lists.
    Structured {
        standard: Vec<String>,
        custom: Vec<String>,
    },
    /// Anything else (scalar, null, mapping without recognized keys).
    /// Never triggers migration.
    Other,
}

impl RuleSet {
    pub fn is_legacy(&self) -> bool {
        matches!(self, RuleSet::Legacy(_))
    }

    /// Classify a YAML node by kind. Only the exact legacy shape — a
    /// sequence made entirely of strings — maps to `Legacy`.
    fn from_value(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Sequence(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => names.push(s.to_string()),
                        None => return RuleSet::Other,
                    }
                }
                RuleSet::Legacy(names)
            }
            serde_yaml::Value::Mapping(map) => {
                let standard = string_list(map.get("standard"));
                let custom = string_list(map.get("custom"));
                if map.contains_key("standard") || map.contains_key("custom") {
                    RuleSet::Structured { standard, custom }
                } else {
                    RuleSet::Other
                }
            }
            _ => RuleSet::Other,
        }
    }
}

/// Extract a list of strings from an optional YAML node, dropping anything
/// that isn't a string. Missing or non-sequence nodes yield an empty list.
fn string_list(value: Option<&serde_yaml::Value>) -> Vec<String> {
    match value {
        Some(serde_yaml::Value::Sequence(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(RuleSet::from_value(&value))
    }
}

impl RulesConfig {
    /// True if any command entry still uses the legacy bare-list `rules`
    /// shape. Short-circuits on the first hit.
    pub fn has_legacy_commands(&self) -> bool {
        self.commands
            .iter()
            .flatten()
            .any(|(_, spec)| spec.rules.as_ref().is_some_and(RuleSet::is_legacy))
    }
}
