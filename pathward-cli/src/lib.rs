//! Library exports for pathward-cli.
//!
//! This module exports the CLI structure so integration tests and the
//! benches can drive commands without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
