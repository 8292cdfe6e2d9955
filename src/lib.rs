//! Core library for the `repotrack` CLI.
//!
//! Reads a project checkout through the [`ports`] boundary, extracts plan
//! [`tasks`], computes [`progress`], and maps dependency [`manifest`]s to
//! [`skills`]. The [`pipeline`] runs these stages for one project.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod ports;
pub mod progress;
pub mod skills;
pub mod tasks;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// `--help` and `--version` print to stdout and succeed.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}
