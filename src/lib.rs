//! Core library for the `exercise-manager` CLI.
//!
//! Keeps a directory of numbered exercise folders (`001-intro`, `002-arrays`,
//! ...) dense and collision-free while exercises are inserted, removed,
//! swapped or renumbered.

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod journal;
pub mod ports;
pub mod reflow;
pub mod resolve;
pub mod roadmap;
pub mod templates;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            let help = cli::Cli::command().render_help();
            return Err(format!("{err}\n{help}"));
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
