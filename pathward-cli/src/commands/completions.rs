//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "pathward";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_instructions(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

/// Installation hints go to stderr so stdout stays a clean script.
fn print_instructions(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    match shell {
        Shell::Bash => {
            eprintln!(
                "#   pathward completions bash > ~/.local/share/bash-completion/completions/pathward"
            );
            eprintln!("# Or in ~/.bashrc:");
            eprintln!("#   eval \"$(pathward completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   pathward completions zsh > ~/.zsh/completions/_pathward");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   pathward completions fish > ~/.config/fish/completions/pathward.fish");
        }
        Shell::PowerShell => {
            eprintln!("#   pathward completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }
    eprintln!();
}
