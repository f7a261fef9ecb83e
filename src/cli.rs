//! Clap adapter for the `codepro` binary.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! The derive types parse arguments; [`run`] dispatches into the clap-free
//! core and maps outcomes to process exit codes:
//!
//! - `check`: 0 = migration needed, 1 = not needed, 2 = error (grep-style,
//!   so shell scripts can branch on the result).
//! - `migrate` / `install`: 0 on success — including a declined prompt,
//!   which is a deliberate no-op, not a failure — and 1 on error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::detect::needs_migration;
use crate::error::CodeproError;
use crate::install::{DirSource, Installer};
use crate::migrate::Migration;
use crate::report::{ConsoleReporter, Reporter};

#[derive(Debug, Parser)]
#[command(name = "codepro", about = "Install and migrate CodePro project rule assets")]
pub struct Cli {
    /// Project directory to operate on (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    pub project_root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report whether the rules configuration uses the legacy schema.
    Check,
    /// Back up and remove a legacy rules directory.
    Migrate {
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        non_interactive: bool,
    },
    /// Install assets from a source directory, migrating first if needed.
    Install {
        /// Directory holding the assets to install.
        #[arg(long)]
        source: PathBuf,

        /// Skip confirmation prompts.
        #[arg(long, short = 'y')]
        non_interactive: bool,

        /// Migrate even when the current schema is already in place.
        #[arg(long)]
        force_migration: bool,
    },
}

/// Execute a parsed command and return the process exit code.
pub fn run(cli: Cli) -> i32 {
    let reporter = ConsoleReporter;
    let is_check = matches!(cli.command, Command::Check);
    match dispatch(cli, &reporter) {
        Ok(code) => code,
        Err(e) => {
            reporter.error(&e.to_string());
            if is_check { 2 } else { 1 }
        }
    }
}

fn dispatch(cli: Cli, reporter: &dyn Reporter) -> Result<i32, CodeproError> {
    match cli.command {
        Command::Check => {
            if needs_migration(&cli.project_root)? {
                reporter.warning("Rules configuration uses the legacy schema");
                Ok(0)
            } else {
                reporter.status("Rules configuration is up to date");
                Ok(1)
            }
        }
        Command::Migrate { non_interactive } => {
            Migration::new(&cli.project_root)
                .non_interactive(non_interactive)
                .reporter(reporter)
                .run()?;
            Ok(0)
        }
        Command::Install {
            source,
            non_interactive,
            force_migration,
        } => {
            Installer::new(&cli.project_root)
                .non_interactive(non_interactive)
                .force_migration(force_migration)
                .reporter(reporter)
                .run(&DirSource::new(source))?;
            Ok(0)
        }
    }
}
