//! Walk command implementation.
//!
//! Runs a guarded traversal and prints every visited path, one per line,
//! followed by a summary on stderr. Traversal defaults come from the
//! `traversal` configuration section; command-line flags can only turn
//! options on or extend the lists.

use crate::error::{json_error, CliError};
use crate::utils::{load_configuration, resolver_for, restrictions_for, GlobalOptions};
use clap::{Args, ValueEnum};
use pathward::config::Config;
use pathward::{ActionResult, RestrictionSet, TraversalEngine, TraversalSpec, TraversalSummary};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Walk directory roots under the restriction set.
#[derive(Args)]
pub struct WalkCommand {
    /// Roots to walk
    #[arg(value_name = "ROOT", required = true)]
    pub roots: Vec<PathBuf>,

    /// Descend into nested directories
    #[arg(long, short = 'r')]
    pub recurse: bool,

    /// Visit directories instead of files
    #[arg(long)]
    pub directories: bool,

    /// Only process files with these extensions (comma-separated, repeatable)
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Skip files with these extensions (comma-separated, repeatable)
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub deny_ext: Vec<String>,

    /// Never visit PREFIX or anything beneath it (repeatable)
    #[arg(long, value_name = "PREFIX")]
    pub skip: Vec<PathBuf>,

    /// Follow symlinked entries
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Include entries whose names start with a dot
    #[arg(long)]
    pub follow_hidden: bool,

    /// Record failures and continue instead of stopping at the first one
    #[arg(long)]
    pub keep_going: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: WalkFormat,
}

/// Output format for the walk command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum WalkFormat {
    /// One path per line, summary on stderr
    Text,
    /// A single JSON document with paths and summary
    Json,
}

#[derive(Serialize)]
struct WalkReport<'a> {
    paths: &'a [PathBuf],
    summary: TraversalSummary,
}

impl WalkCommand {
    /// Execute the walk command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let restrictions = self.restrictions(&config)?;
        let spec = self.spec(&config);
        let engine = TraversalEngine::new(&restrictions).with_resolver(resolver_for(&config));

        match self.format {
            WalkFormat::Text => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                let summary = self.run(&engine, &spec, |path| {
                    writeln!(handle, "{}", path.display())?;
                    Ok(())
                })?;
                handle.flush()?;

                if !global.quiet {
                    eprintln!(
                        "{} processed, {} skipped, {} failed",
                        summary.processed, summary.skipped, summary.action_failures
                    );
                }
            }
            WalkFormat::Json => {
                let mut paths = Vec::new();
                let summary = self.run(&engine, &spec, |path| {
                    paths.push(path.to_path_buf());
                    Ok(())
                })?;

                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                let report = WalkReport {
                    paths: &paths,
                    summary,
                };
                serde_json::to_writer_pretty(&mut handle, &report).map_err(json_error)?;
                writeln!(handle)?;
            }
        }

        Ok(())
    }

    fn run<F>(
        &self,
        engine: &TraversalEngine<'_>,
        spec: &TraversalSpec,
        action: F,
    ) -> Result<TraversalSummary, CliError>
    where
        F: FnMut(&Path) -> ActionResult,
    {
        let summary = if self.directories {
            engine.run_directories(spec, action)?
        } else {
            engine.run(spec, action)?
        };
        Ok(summary)
    }

    /// The configured set, or the walk roots themselves when none is
    /// configured.
    fn restrictions(&self, config: &Config) -> Result<RestrictionSet, CliError> {
        if config.restrictions.is_some() {
            return restrictions_for(config);
        }

        log::info!("no restrictions configured; confining the walk to its roots");
        let mut set = RestrictionSet::new("walk roots");
        let write = config
            .traversal
            .as_ref()
            .and_then(|t| t.temporary_mode)
            .is_some();
        for root in &self.roots {
            set.add_path(root, write)?;
        }
        Ok(set)
    }

    fn spec(&self, config: &Config) -> TraversalSpec {
        let mut spec = match config.traversal {
            Some(ref section) => TraversalSpec::from_config(&self.roots, section),
            None => TraversalSpec::new(&self.roots),
        };

        if self.recurse {
            spec = spec.with_recurse(true);
        }
        if self.follow_symlinks {
            spec = spec.with_follow_symlinks(true);
        }
        if self.follow_hidden {
            spec = spec.with_follow_hidden(true);
        }
        if self.keep_going {
            spec = spec.with_ignore_action_errors(true);
        }
        if !self.ext.is_empty() {
            spec = spec.with_allowed_extensions(&self.ext);
        }
        if !self.deny_ext.is_empty() {
            spec = spec.with_denied_extensions(&self.deny_ext);
        }
        for prefix in &self.skip {
            spec = spec.with_skip_prefix(prefix);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathward::config::TraversalConfig;

    fn command(roots: &[&str]) -> WalkCommand {
        WalkCommand {
            roots: roots.iter().map(PathBuf::from).collect(),
            recurse: false,
            directories: false,
            ext: Vec::new(),
            deny_ext: Vec::new(),
            skip: Vec::new(),
            follow_symlinks: false,
            follow_hidden: false,
            keep_going: false,
            format: WalkFormat::Text,
        }
    }

    #[test]
    fn test_flags_extend_configured_defaults() {
        let config = Config {
            traversal: Some(TraversalConfig {
                follow_hidden: Some(true),
                extension_deny: Some(vec!["tmp".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut cmd = command(&["/srv"]);
        cmd.recurse = true;
        cmd.deny_ext = vec!["bak".into()];

        let spec = cmd.spec(&config);
        assert!(spec.recurse);
        assert!(spec.follow_hidden);
        let deny = spec.extension_deny.unwrap();
        assert!(deny.contains("tmp"));
        assert!(deny.contains("bak"));
        assert!(spec.extension_allow.is_none());
    }

    #[test]
    fn test_roots_become_restrictions_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let set = command(&[root]).restrictions(&Config::default()).unwrap();
        assert_eq!(set.entries().len(), 1);
        assert!(!set.entries()[0].write_allowed());
        assert!(set.check_read(dir.path().join("x")).is_ok());
    }
}
