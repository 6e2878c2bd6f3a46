//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, CompletionsCommand, MountsCommand, NormalizeCommand, ResolveCommand,
    ValidateCommand, WalkCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for restricted path access and mount lookups.
#[derive(Parser)]
#[command(name = "pathward")]
#[command(version, about = "Check, walk and inspect paths under a restriction set", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PATHWARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the lexically normalized form of a path
    Normalize(NormalizeCommand),

    /// Follow a symlink chain to its final target
    Resolve(ResolveCommand),

    /// Check a path against the restriction set
    Check(CheckCommand),

    /// Walk directory roots under the restriction set
    Walk(WalkCommand),

    /// Look up entries in the mount table
    Mounts(MountsCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
