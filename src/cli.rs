//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `exercise-manager`.
#[derive(Debug, Parser)]
#[command(
    name = "exercise-manager",
    version,
    about = "Insert, remove, swap and renumber numbered exercise folders"
)]
pub struct Cli {
    /// Report intended actions without changing anything on disk.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Resolve conflicts without asking (oldest wins) and skip confirmations.
    #[arg(long, global = true)]
    pub auto: bool,

    /// Directory holding the exercise folders.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// The command to execute. Prints usage when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shift exercises at or after POSITION up by one and create a new one there.
    Insert {
        /// Number the new exercise takes.
        position: u32,
        /// Descriptive name, e.g. `array-methods`.
        slug: String,
    },
    /// Delete an exercise and shift later exercises down by one.
    Remove {
        /// Number of the exercise to delete.
        number: u32,
    },
    /// Exchange the positions of two exercises.
    Swap {
        /// First exercise number.
        first: u32,
        /// Second exercise number.
        second: u32,
    },
    /// Resolve duplicate numbers and renumber everything to 1..N.
    Cleanup,
    /// List exercises with a completeness marker.
    List,
}

impl Command {
    /// Short description used as the journal's command label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Insert { position, slug } => format!("insert {position} {slug}"),
            Self::Remove { number } => format!("remove {number}"),
            Self::Swap { first, second } => format!("swap {first} {second}"),
            Self::Cleanup => "cleanup".to_string(),
            Self::List => "list".to_string(),
        }
    }
}
