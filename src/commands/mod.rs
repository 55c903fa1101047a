//! Command dispatch and handlers.

pub mod cleanup;
pub mod insert;
pub mod list;
pub mod remove;
pub mod swap;

use std::fmt::Write;

use clap::CommandFactory;

use crate::cli::{Cli, Command};
use crate::config::ManagerConfig;
use crate::context::{RunMode, ServiceContext};
use crate::error::Result;
use crate::reflow::{ReflowReport, Step};
use crate::roadmap;

/// Dispatch a parsed command line to its handler.
///
/// Prints usage when no subcommand was given. When a journal path is
/// configured, every mutating filesystem call is journaled and the journal
/// is written once the command finishes, even if it failed.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the command fails.
pub fn dispatch(cli: &Cli) -> std::result::Result<(), String> {
    let Some(command) = &cli.command else {
        Cli::command().print_help().map_err(|e| e.to_string())?;
        println!();
        return Ok(());
    };

    let config = ManagerConfig::load(cli.root.as_deref())?;
    let mode = RunMode { dry_run: cli.dry_run, auto: cli.auto };
    let ctx = ServiceContext::live(&config, mode, &command.label()).map_err(|e| format!("Error: {e}"))?;

    let result = dispatch_with_context(command, &ctx, &config);

    match ctx.finish() {
        Ok(Some(path)) => eprintln!("Journal saved to: {}", path.display()),
        Ok(None) => {}
        Err(err) => eprintln!("Warning: {err}"),
    }

    result.map_err(|err| {
        if mode.dry_run {
            format!("Error while simulating (dry run, nothing was changed): {err}")
        } else {
            format!("Error: {err}")
        }
    })
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns the engine error of the failing command.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &ManagerConfig,
) -> Result<()> {
    match command {
        Command::Insert { position, slug } => insert::run(ctx, config, *position, slug),
        Command::Remove { number } => remove::run(ctx, config, *number),
        Command::Swap { first, second } => swap::run(ctx, config, *first, *second),
        Command::Cleanup => cleanup::run(ctx, config),
        Command::List => list::run(ctx, config),
    }
}

/// Formats steps as an indented, human-readable list.
#[must_use]
pub fn format_steps(report: &ReflowReport) -> String {
    let mut out = String::new();
    for step in report.steps() {
        let _ = match step {
            Step::Rename { from, to } => writeln!(out, "  rename {from} -> {to}"),
            Step::Create { name } => writeln!(out, "  create {name}"),
            Step::Delete { name } => writeln!(out, "  delete {name}"),
        };
    }
    out
}

/// Syncs the roadmap with `report` and prints what happened (or would happen).
fn finish_reflow(ctx: &ServiceContext, config: &ManagerConfig, report: &ReflowReport) -> Result<()> {
    let roadmap_changed = roadmap::sync(ctx.fs.as_ref(), &config.roadmap, report)?;

    if report.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    let mut steps = format_steps(report);
    if roadmap_changed {
        let _ = writeln!(steps, "  update {}", config.roadmap.display());
    }
    if ctx.mode.dry_run {
        println!("Dry run, nothing was changed. A live run would:");
        for line in steps.lines() {
            println!("[dry-run] {}", line.trim_start());
        }
    } else {
        println!("Done:");
        print!("{steps}");
    }
    Ok(())
}
