#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::detect::rules_dir;

    /// A config.yaml still using the bare-list rules schema.
    pub const LEGACY_CONFIG: &str = r#"commands:
  review:
    rules:
      - no-secrets
      - conventional-commits
  commit:
    rules:
      - no-secrets
"#;

    /// A config.yaml in the current standard/custom schema.
    pub const STRUCTURED_CONFIG: &str = r#"commands:
  review:
    rules:
      standard:
        - no-secrets
        - conventional-commits
      custom:
        - team-style
  commit:
    rules:
      standard:
        - no-secrets
"#;

    /// Temp project with `.claude/rules/config.yaml` holding `config`.
    pub fn project_with_config(config: &str) -> TempDir {
        let project = TempDir::new().unwrap();
        let rules = rules_dir(project.path());
        fs::create_dir_all(&rules).unwrap();
        fs::write(rules.join("config.yaml"), config).unwrap();
        project
    }

    /// Legacy project with a config file plus a nested rule definition,
    /// mirroring the tree a prior install leaves behind.
    pub fn legacy_project() -> TempDir {
        let project = project_with_config(LEGACY_CONFIG);
        let core = rules_dir(project.path()).join("core");
        fs::create_dir_all(&core).unwrap();
        fs::write(core.join("test-rule.md"), "# Test rule\n\nAlways pass.\n").unwrap();
        project
    }

    /// The `rules.backup.*` siblings of the rules directory, if any.
    pub fn backup_dirs(project_root: &Path) -> Vec<PathBuf> {
        let claude = project_root.join(crate::detect::CLAUDE_DIR);
        let Ok(entries) = fs::read_dir(claude) else {
            return vec![];
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("rules.backup."))
            })
            .collect();
        dirs.sort();
        dirs
    }
}
