//! Installer and legacy-config migration for CodePro project rule assets.
//!
//! CodePro ships a set of per-project assets — rule definitions, command
//! templates, a server-list document — that live under `.claude/` in a
//! target project. Earlier releases wrote the rules configuration
//! (`.claude/rules/config.yaml`) with each command's `rules` field as a bare
//! list of rule names; the current schema splits it into `standard` and
//! `custom` lists. Old files carry no version marker, so upgrading a project
//! means looking at the shape of the data and, when the old shape is found,
//! clearing the way for a fresh install without losing anything the user had.
//!
//! That is the core of this crate:
//!
//! - [`needs_migration`] inspects `config.yaml` structurally and reports
//!   whether any command entry still uses the legacy shape. Missing files
//!   mean "no"; malformed files are an error, never a silent "no".
//! - [`Migration`] backs the whole `rules` directory up into a timestamped
//!   `rules.backup.<stamp>` sibling and then removes it. The wipe only runs
//!   after the copy has fully succeeded, so a failure at any point leaves
//!   either the original tree or a complete backup on disk — never neither.
//!   Backups are kept forever; nothing in this crate deletes one.
//!
//! ```ignore
//! if codepro::needs_migration(&project_root)? {
//!     let outcome = codepro::Migration::new(&project_root)
//!         .non_interactive(args.yes)
//!         .run()?;
//! }
//! ```
//!
//! # Interactivity
//!
//! Migration is destructive (recoverably so), so by default it asks for
//! confirmation on stdin. `non_interactive(true)` suppresses the prompt for
//! scripted use, and [`Migration::confirm_with`] replaces it entirely —
//! tests and embedders answer the prompt programmatically. Declining is a
//! deliberate no-op ([`MigrationOutcome::Cancelled`]), not an error.
//!
//! Status output follows the same rule: everything goes through a
//! [`Reporter`] passed into the entry points. [`ConsoleReporter`] prints
//! colored terminal output; [`SilentReporter`] discards it.
//!
//! # Installing assets
//!
//! [`Installer`] drives a full upgrade: detect, migrate if needed (or when
//! forced), copy an [`AssetSource`]'s file tree into `.claude/`, and merge
//! the shipped server-list document into the project's `.mcp.json` with
//! [`merge_server_lists`] — existing entries always win, so local server
//! definitions survive every install. [`DirSource`] serves assets from a
//! local directory; fetching them over the network is out of scope here.
//!
//! # CLI
//!
//! The `codepro` binary (behind the default-on `clap` feature) exposes
//! `check`, `migrate`, and `install` subcommands. `check` exits 0 when
//! migration is needed and 1 when it is not, so shell scripts can branch on
//! it directly.

pub mod error;
pub mod schema;

#[cfg(feature = "clap")]
pub mod cli;
mod detect;
mod install;
pub(crate) mod merge;
mod migrate;
mod report;

#[cfg(test)]
mod fixtures;

pub use detect::{needs_migration, rules_config_path, rules_dir};
pub use error::CodeproError;
pub use install::{AssetSource, DirSource, Installer};
pub use merge::merge_server_lists;
pub use migrate::{Migration, MigrationOutcome, run_migration};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
