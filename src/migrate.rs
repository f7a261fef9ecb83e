//! Backup-then-wipe migration of a legacy rules directory.
//!
//! When [`needs_migration`](crate::detect::needs_migration) reports a legacy
//! schema (or the caller forces it), the whole `.claude/rules` tree is copied
//! into a timestamped `rules.backup.<stamp>` sibling and then removed, so a
//! fresh install can repopulate it in the current schema.
//!
//! The ordering guarantee is absolute: the wipe only runs after the backup
//! copy has fully succeeded. A copy failure aborts with the original tree
//! untouched; a wipe failure is surfaced with the backup path so nothing is
//! ever lost. Backups are never overwritten and never deleted by this crate.
//!
//! A single run assumes exclusive access to the project directory — running
//! two migrations concurrently against the same project is not supported.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::{fs, io};

use walkdir::WalkDir;

use crate::detect::{RULES_DIR, rules_dir};
use crate::error::CodeproError;
use crate::report::{ConsoleReporter, Reporter};

static CONSOLE: ConsoleReporter = ConsoleReporter;

/// Terminal state of a migration run.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// The rules tree was backed up and removed.
    Migrated { backup: PathBuf },
    /// No rules directory existed; nothing to do.
    Skipped,
    /// The user declined the confirmation prompt. Not an error.
    Cancelled,
}

/// Builder for a single migration run.
///
/// ```ignore
/// let outcome = Migration::new(&project_root)
///     .non_interactive(args.yes)
///     .run()?;
/// ```
pub struct Migration<'a> {
    project_root: PathBuf,
    non_interactive: bool,
    reporter: &'a dyn Reporter,
    confirm: Box<dyn FnMut(&str) -> bool + 'a>,
}

impl<'a> Migration<'a> {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            non_interactive: false,
            reporter: &CONSOLE,
            confirm: Box::new(confirm_stdin),
        }
    }

    /// Skip the confirmation prompt (scripted/CI use).
    pub fn non_interactive(mut self, yes: bool) -> Self {
        self.non_interactive = yes;
        self
    }

    /// Route status output somewhere other than the terminal.
    pub fn reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the stdin confirmation prompt. The callback receives the
    /// prompt text and returns whether to proceed.
    pub fn confirm_with(mut self, confirm: impl FnMut(&str) -> bool + 'a) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Run the migration: confirm (unless non-interactive), back up, wipe.
    ///
    /// A missing rules directory is a no-op success, which makes a second
    /// run after a successful migration idempotent.
    pub fn run(mut self) -> Result<MigrationOutcome, CodeproError> {
        let rules = rules_dir(&self.project_root);

        if !rules.is_dir() {
            self.reporter
                .status("No rules directory found — nothing to migrate");
            return Ok(MigrationOutcome::Skipped);
        }

        if !self.non_interactive {
            let prompt = format!(
                "Your rules configuration uses an older format. {} will be \
                 backed up and replaced. Continue? [y/N] ",
                rules.display()
            );
            if !(self.confirm)(&prompt) {
                self.reporter
                    .warning("Migration cancelled — rules directory left untouched");
                return Ok(MigrationOutcome::Cancelled);
            }
        }

        let backup = allocate_backup_path(&rules);
        self.reporter
            .status(&format!("Backing up rules to {}", backup.display()));
        copy_tree(&rules, &backup)?;

        self.reporter.status("Removing legacy rules directory");
        fs::remove_dir_all(&rules).map_err(|source| CodeproError::WipeFailed {
            path: rules.clone(),
            backup: backup.clone(),
            source,
        })?;

        self.reporter.success(&format!(
            "Migration complete — previous rules saved in {}",
            backup.display()
        ));
        Ok(MigrationOutcome::Migrated { backup })
    }
}

/// One-shot form of the [`Migration`] builder with default console output.
pub fn run_migration(
    project_root: &Path,
    non_interactive: bool,
) -> Result<MigrationOutcome, CodeproError> {
    Migration::new(project_root)
        .non_interactive(non_interactive)
        .run()
}

/// Pick a backup directory name next to `rules` that does not exist yet.
///
/// Names are `rules.backup.<stamp>` with a seconds-resolution local
/// timestamp; if that exists (two runs within one second, or prior backups),
/// a `-2`, `-3`, … suffix disambiguates. Creation itself still uses
/// create-new semantics, so a race on the chosen name fails loudly instead
/// of overwriting.
fn allocate_backup_path(rules: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    allocate_backup_path_with_stamp(rules, &stamp)
}

fn allocate_backup_path_with_stamp(rules: &Path, stamp: &str) -> PathBuf {
    let parent = rules.parent().unwrap_or_else(|| Path::new("."));
    let mut candidate = parent.join(format!("{RULES_DIR}.backup.{stamp}"));
    let mut n = 2;
    while candidate.exists() {
        candidate = parent.join(format!("{RULES_DIR}.backup.{stamp}-{n}"));
        n += 1;
    }
    candidate
}

/// Recursively copy `src` into the not-yet-existing `dst`, preserving
/// relative paths. Any failure maps to `BackupFailed` and leaves `src`
/// unmodified; the wipe never starts unless this returns `Ok`.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), CodeproError> {
    fs::create_dir(dst).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            CodeproError::BackupExists { path: dst.into() }
        } else {
            CodeproError::BackupFailed {
                path: src.into(),
                source,
            }
        }
    })?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| CodeproError::BackupFailed {
            path: src.into(),
            source: io::Error::other(e),
        })?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under its root");
        let target = dst.join(rel);

        let result = if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            fs::copy(entry.path(), &target).map(|_| ())
        };
        result.map_err(|source| CodeproError::BackupFailed {
            path: entry.path().to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Default interactive confirmation: read a y/N answer from stdin.
fn confirm_stdin(prompt: &str) -> bool {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
