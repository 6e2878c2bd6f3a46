//! Resolve command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, resolver_for, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Follow a symlink chain to its final target.
///
/// Fails with a broken-link error when the chain ends at a missing path and
/// with a loop error when it exceeds the configured hop bound.
#[derive(Args)]
pub struct ResolveCommand {
    /// Path to resolve
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Maximum symlink hops, overriding the configured bound
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut resolver = resolver_for(&config);
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(CliError::InvalidArguments(
                    "--max-depth must be at least 1".to_string(),
                ));
            }
            resolver = resolver.with_max_symlink_depth(depth);
        }

        let target = resolver.resolve_symlink(&self.path)?;
        println!("{}", target.display());
        Ok(())
    }
}
