//! Asset installation on top of the migration core.
//!
//! An [`AssetSource`] hands the installer a file listing and individual file
//! contents; where those come from (a release archive, a checkout, a mirror)
//! is the source's business. [`DirSource`] serves assets from a local
//! directory tree, which covers offline installs and tests. Network
//! retrieval is deliberately not implemented here.
//!
//! [`Installer::run`] sequences a full install: detect a legacy rules
//! schema, migrate it (backup + wipe) when needed or forced, copy the asset
//! tree into `.claude/`, and merge the shipped server-list document into the
//! project's existing one instead of clobbering it.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::detect::{CLAUDE_DIR, RULES_DIR, needs_migration};
use crate::error::CodeproError;
use crate::merge::merge_server_lists;
use crate::migrate::{Migration, MigrationOutcome};
use crate::report::{ConsoleReporter, Reporter};

/// Project-root file holding the server-list document.
pub const SERVER_LIST_FILE: &str = ".mcp.json";
/// Top-level key whose entries are merged one by one rather than replaced.
pub const SERVER_LIST_KEY: &str = "mcpServers";

static CONSOLE: ConsoleReporter = ConsoleReporter;

/// Where installable assets come from.
///
/// Paths are relative to the source root and use `/` separators; `list`
/// returns paths that can be passed straight back to `fetch`.
pub trait AssetSource {
    /// Relative paths of every file under `dir` (`""` for the whole source).
    fn list(&self, dir: &str) -> Result<Vec<String>, CodeproError>;

    /// Copy one file into `local_path`. The parent directory exists.
    fn fetch(&self, remote_path: &str, local_path: &Path) -> Result<(), CodeproError>;
}

/// Assets served from a local directory tree.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirSource {
    fn list(&self, dir: &str) -> Result<Vec<String>, CodeproError> {
        let base = if dir.is_empty() {
            self.root.clone()
        } else {
            self.root.join(dir)
        };
        if !base.exists() {
            return Ok(vec![]);
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&base) {
            let entry = entry.map_err(|e| CodeproError::Io {
                path: base.clone(),
                source: std::io::Error::other(e),
            })?;
            if entry.file_type().is_file() {
                let rel = entry
                    .path()
                    .strip_prefix(&self.root)
                    .expect("walkdir yields paths under its root");
                paths.push(rel.to_string_lossy().into_owned());
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn fetch(&self, remote_path: &str, local_path: &Path) -> Result<(), CodeproError> {
        let src = self.root.join(remote_path);
        match fs::copy(&src, local_path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CodeproError::AssetNotFound {
                    name: remote_path.to_string(),
                })
            }
            Err(source) => Err(CodeproError::Io { path: src, source }),
        }
    }
}

/// Builder for a full install run against one project directory.
pub struct Installer<'a> {
    project_root: PathBuf,
    non_interactive: bool,
    force_migration: bool,
    reporter: &'a dyn Reporter,
    confirm: Option<Box<dyn FnMut(&str) -> bool + 'a>>,
}

impl<'a> Installer<'a> {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            non_interactive: false,
            force_migration: false,
            reporter: &CONSOLE,
            confirm: None,
        }
    }

    /// Skip all confirmation prompts (scripted/CI use).
    pub fn non_interactive(mut self, yes: bool) -> Self {
        self.non_interactive = yes;
        self
    }

    /// Run the backup-and-wipe migration even when detection says the
    /// current schema is already in place.
    pub fn force_migration(mut self, yes: bool) -> Self {
        self.force_migration = yes;
        self
    }

    pub fn reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the migration confirmation prompt (see
    /// [`Migration::confirm_with`]).
    pub fn confirm_with(mut self, confirm: impl FnMut(&str) -> bool + 'a) -> Self {
        self.confirm = Some(Box::new(confirm));
        self
    }

    /// Migrate if needed, then install every asset from `source`.
    ///
    /// A declined migration prompt is not an error: the install proceeds,
    /// but the legacy `rules` subtree is left untouched (no rules assets
    /// are written over it).
    pub fn run(mut self, source: &dyn AssetSource) -> Result<(), CodeproError> {
        let mut skip_rules = false;

        if self.force_migration || needs_migration(&self.project_root)? {
            let mut migration = Migration::new(&self.project_root)
                .non_interactive(self.non_interactive)
                .reporter(self.reporter);
            if let Some(confirm) = self.confirm.take() {
                migration = migration.confirm_with(confirm);
            }
            let outcome = migration.run()?;
            if outcome == MigrationOutcome::Cancelled {
                self.reporter
                    .warning("Keeping legacy rules — skipping rules assets");
                skip_rules = true;
            }
        }

        self.install_assets(source, skip_rules)?;
        self.reporter.success("Install complete");
        Ok(())
    }

    fn install_assets(
        &self,
        source: &dyn AssetSource,
        skip_rules: bool,
    ) -> Result<(), CodeproError> {
        let rules_prefix = format!("{RULES_DIR}/");
        let mut installed = 0usize;

        for rel in source.list("")? {
            if rel == SERVER_LIST_FILE {
                self.merge_server_file(source)?;
                continue;
            }
            if skip_rules && rel.starts_with(&rules_prefix) {
                continue;
            }

            let dest = self.project_root.join(CLAUDE_DIR).join(&rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|source| CodeproError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            source.fetch(&rel, &dest)?;
            installed += 1;
        }

        self.reporter
            .status(&format!("Installed {installed} asset files"));
        Ok(())
    }

    /// Fetch the shipped server-list document and merge it into the
    /// project's existing one. Existing entries win; shipped entries fill
    /// gaps. A project without the file just takes the shipped document.
    fn merge_server_file(&self, source: &dyn AssetSource) -> Result<(), CodeproError> {
        let dest = self.project_root.join(SERVER_LIST_FILE);
        let staged = self.project_root.join(format!("{SERVER_LIST_FILE}.new"));

        source.fetch(SERVER_LIST_FILE, &staged)?;
        let incoming = read_json(&staged)?;
        let merged = match fs::read_to_string(&dest) {
            Ok(content) => {
                let existing = serde_json::from_str(&content).map_err(|source| {
                    CodeproError::ParseJson {
                        path: dest.clone(),
                        source,
                    }
                })?;
                merge_server_lists(existing, incoming, SERVER_LIST_KEY)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => incoming,
            Err(source) => {
                return Err(CodeproError::Io {
                    path: dest,
                    source,
                });
            }
        };

        let rendered = serde_json::to_string_pretty(&merged).map_err(|source| {
            CodeproError::ParseJson {
                path: dest.clone(),
                source,
            }
        })?;
        fs::write(&dest, rendered + "\n").map_err(|source| CodeproError::Io {
            path: dest.clone(),
            source,
        })?;
        let _ = fs::remove_file(&staged);

        self.reporter
            .status(&format!("Merged server list into {SERVER_LIST_FILE}"));
        Ok(())
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value, CodeproError> {
    let content = fs::read_to_string(path).map_err(|source| CodeproError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CodeproError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}
