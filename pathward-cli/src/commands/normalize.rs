//! Normalize command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, resolver_for, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Print the lexically normalized form of a path.
///
/// `~` is expanded, relative paths are made absolute against the current
/// directory and `.`/`..` components are folded. The filesystem is not
/// consulted unless `--canonical` is given.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Path to normalize
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Also resolve symlinks in the existing prefix of the path
    #[arg(long)]
    pub canonical: bool,
}

impl NormalizeCommand {
    /// Execute the normalize command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let resolver = resolver_for(&config);

        if self.canonical {
            let canonical = resolver.canonical(&self.path)?;
            println!("{}", canonical.display());
        } else {
            let normalized = resolver.normalize(&self.path)?;
            println!("{normalized}");
        }

        Ok(())
    }
}
