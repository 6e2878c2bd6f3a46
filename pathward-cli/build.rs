//! Build script for pathward-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("pathward")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check, walk and inspect paths under a restriction set")
        .long_about(
            "Command-line tool for restricted path checks, guarded directory traversal \
             and mount-table lookups",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PATHWARD_DATA_DIR"),
        )
        .subcommands(vec![
            Command::new("normalize")
                .about("Print the lexically normalized form of a path")
                .long_about("Expand ~, make the path absolute and fold . and .. components"),
            Command::new("resolve")
                .about("Follow a symlink chain to its final target")
                .long_about("Resolve a symlink chain with loop protection"),
            Command::new("check")
                .about("Check a path against the restriction set")
                .long_about("Exit 0 when read or write access is allowed and 1 when denied"),
            Command::new("walk")
                .about("Walk directory roots under the restriction set")
                .long_about("Print every file or directory a guarded traversal visits"),
            Command::new("mounts")
                .about("Look up entries in the mount table")
                .long_about("Show mount-table entries by target, source or containing path"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a pathward configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("pathward.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
