//! Check command implementation.
//!
//! Checks a single path against a restriction set and exits 0 when access
//! is allowed and 1 when it is denied. The set comes from the
//! `restrictions` configuration section unless `--allow`/`--allow-write`
//! prefixes are given on the command line, in which case those replace it.

use crate::error::CliError;
use crate::utils::{load_configuration, restrictions_for, GlobalOptions};
use clap::Args;
use pathward::RestrictionSet;
use std::path::PathBuf;

/// Label of a restriction set assembled from command-line prefixes.
const CLI_LABEL: &str = "command line";

/// Check a path against the restriction set.
#[derive(Args)]
pub struct CheckCommand {
    /// Path to check
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Check write access instead of read access
    #[arg(long)]
    pub write: bool,

    /// Allow reads beneath PREFIX (repeatable)
    #[arg(long, value_name = "PREFIX")]
    pub allow: Vec<PathBuf>,

    /// Allow reads and writes beneath PREFIX (repeatable)
    #[arg(long, value_name = "PREFIX")]
    pub allow_write: Vec<PathBuf>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let set = if self.allow.is_empty() && self.allow_write.is_empty() {
            let config = load_configuration(global)?;
            restrictions_for(&config)?
        } else {
            self.command_line_set()?
        };

        log::debug!(
            "checking {} for {} under '{}'",
            self.path.display(),
            if self.write { "write" } else { "read" },
            set.label()
        );

        set.check(&self.path, self.write)?;

        if !global.quiet {
            println!(
                "{} access allowed: {}",
                if self.write { "write" } else { "read" },
                self.path.display()
            );
        }
        Ok(())
    }

    /// Writable prefixes first so they win over overlapping read-only ones.
    fn command_line_set(&self) -> Result<RestrictionSet, CliError> {
        let mut set = RestrictionSet::new(CLI_LABEL);
        for prefix in &self.allow_write {
            set.add_path(prefix, true)?;
        }
        for prefix in &self.allow {
            set.add_path(prefix, false)?;
        }
        Ok(set)
    }
}
