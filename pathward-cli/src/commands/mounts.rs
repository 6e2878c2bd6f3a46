//! Mounts command implementation.
//!
//! This module implements the `mounts` command, which loads a mount table
//! and displays all entries, or the entries selected by target, source or
//! containment, in various formats (table, JSON, CSV, TSV).

use crate::error::{csv_error, json_error, CliError};
use crate::utils::{load_configuration, mount_source_for, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use pathward::mount::{MountEntry, MountTable};
use std::io::Write;
use std::path::PathBuf;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["source", "target", "type", "options", "dump", "pass"];

/// Look up entries in the mount table.
#[derive(Args)]
pub struct MountsCommand {
    /// Show the entry mounted exactly at DIR
    #[arg(long, value_name = "DIR", conflicts_with_all = ["source", "containing"])]
    pub target: Option<PathBuf>,

    /// Show every entry whose source is SRC
    #[arg(long, value_name = "SRC", conflicts_with = "containing")]
    pub source: Option<String>,

    /// Show the innermost mount containing PATH
    #[arg(long, value_name = "PATH")]
    pub containing: Option<PathBuf>,

    /// Read the table from FILE instead of the configured source
    #[arg(long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "PATHWARD_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// Output format for the mounts command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl MountsCommand {
    /// Execute the mounts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and pick the table source
        let config = load_configuration(global)?;
        let source = mount_source_for(self.table.as_deref(), &config);
        log::debug!("reading mount table from {}", source.path().display());

        // 2. Parse the table
        let table = MountTable::refresh(&source)?;

        // 3. Select entries
        let entries: Vec<&MountEntry> = if let Some(ref target) = self.target {
            vec![table.lookup_by_target(target)?]
        } else if let Some(ref src) = self.source {
            let matches: Vec<&MountEntry> =
                table.lookup_by_source(src).iter().map(|entry| &**entry).collect();
            if matches.is_empty() {
                return Err(CliError::SemanticFailure(format!(
                    "no mount with source {src}"
                )));
            }
            matches
        } else if let Some(ref path) = self.containing {
            vec![table.containing_mount(path)?]
        } else {
            table.entries().collect()
        };

        // 4. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&entries, self.show_full_paths)?,
            OutputFormat::Json => format_as_json(&entries)?,
            OutputFormat::Csv => format_as_delimited(&entries, b',')?,
            OutputFormat::Tsv => format_as_delimited(&entries, b'\t')?,
        }

        Ok(())
    }
}

/// Format entries as a human-readable table.
fn format_as_table(entries: &[&MountEntry], show_full: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for entry in entries {
        let target = if show_full {
            entry.target.display().to_string()
        } else {
            shorten_path(&entry.target)
        };

        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            entry.source,
            target,
            entry.filesystem_type,
            entry.options,
            entry.dump_frequency,
            entry.pass_number,
        )?;
    }

    Ok(())
}

/// Format entries as JSON.
fn format_as_json(entries: &[&MountEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, entries).map_err(json_error)?;
    writeln!(handle)?;

    Ok(())
}

/// Format entries as delimited output (CSV or TSV).
fn format_as_delimited(entries: &[&MountEntry], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for entry in entries {
        writer
            .write_record(&[
                entry.source.clone(),
                entry.target.display().to_string(),
                entry.filesystem_type.clone(),
                entry.options.clone(),
                entry.dump_frequency.to_string(),
                entry.pass_number.to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
