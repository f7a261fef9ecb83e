//! Legacy-schema detection for a project's rules configuration.
//!
//! Detection is purely structural: old config files carry no version marker,
//! so the only signal is the YAML shape of each command's `rules` field (see
//! [`schema`](crate::schema)). A project needs migration when any command
//! entry still uses the legacy bare-list shape.
//!
//! A missing `config.yaml` (or a missing `commands` key) means there is
//! nothing to migrate and is not an error. A malformed `config.yaml` is
//! surfaced as [`CodeproError::Parse`] — the detector never silently maps
//! "could not read the schema" to "no migration needed".

use std::path::{Path, PathBuf};

use crate::error::CodeproError;
use crate::schema::RulesConfig;

/// Directory under the project root holding all installed assets.
pub const CLAUDE_DIR: &str = ".claude";
/// Rules subdirectory name, both the live tree and the backup name stem.
pub const RULES_DIR: &str = "rules";
/// The per-command rule configuration file inside the rules directory.
pub const RULES_CONFIG: &str = "config.yaml";

/// `<project_root>/.claude/rules`
pub fn rules_dir(project_root: &Path) -> PathBuf {
    project_root.join(CLAUDE_DIR).join(RULES_DIR)
}

/// `<project_root>/.claude/rules/config.yaml`
pub fn rules_config_path(project_root: &Path) -> PathBuf {
    rules_dir(project_root).join(RULES_CONFIG)
}

/// Check whether the project's rules configuration uses the legacy schema.
///
/// Returns `Ok(false)` when no `config.yaml` exists. Short-circuits true on
/// the first legacy command entry.
pub fn needs_migration(project_root: &Path) -> Result<bool, CodeproError> {
    let config_path = rules_config_path(project_root);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(CodeproError::Io {
                path: config_path,
                source: e,
            });
        }
    };

    let config: RulesConfig =
        serde_yaml::from_str(&content).map_err(|source| CodeproError::Parse {
            path: config_path,
            source,
        })?;

    Ok(config.has_legacy_commands())
}
