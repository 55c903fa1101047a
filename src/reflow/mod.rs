//! Renumber/shift executor.
//!
//! Every bulk operation is a sequence of [`rename_exercise`] calls ordered
//! so that no rename ever targets a slot still held by another exercise.
//! Numbers at or above [`TEMP_BASE`] are reserved as scratch space and are
//! never assigned to a real exercise.

mod cleanup;
mod rename;
mod shift;

use std::collections::BTreeMap;

pub use cleanup::cleanup;
pub use rename::rename_exercise;
pub use shift::{insert, remove, swap, RemoveOutcome};

use crate::catalog::ExerciseRecord;
use crate::context::ServiceContext;
use crate::error::{ManagerError, Result};
use crate::resolve::detect_duplicates;

/// First number of the reserved temporary band.
pub const TEMP_BASE: u32 = 9000;

/// Staging numbers used by `swap` for its two exercises.
pub const SWAP_SLOTS: (u32, u32) = (9999, 9998);

/// One filesystem-visible action taken by a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An exercise folder moved.
    Rename {
        /// Folder name before the move.
        from: String,
        /// Folder name after the move.
        to: String,
    },
    /// A new exercise folder was created.
    Create {
        /// Folder name.
        name: String,
    },
    /// An exercise folder was deleted.
    Delete {
        /// Folder name.
        name: String,
    },
}

/// Ordered steps of one bulk operation plus its net effect on folder names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowReport {
    steps: Vec<Step>,
    /// (original name, current name), in first-moved order.
    moves: Vec<(String, String)>,
}

impl ReflowReport {
    /// Every step in execution order, temporary hops included.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns `true` when nothing was changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Original folder name to final folder name, temporary hops folded away.
    ///
    /// Exercises that ended where they started are left out.
    #[must_use]
    pub fn net_renames(&self) -> BTreeMap<String, String> {
        self.moves.iter().filter(|(from, to)| from != to).cloned().collect()
    }

    /// Names of folders created by the operation.
    pub fn created(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| match s {
            Step::Create { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Names of folders deleted by the operation.
    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| match s {
            Step::Delete { name } => Some(name.as_str()),
            _ => None,
        })
    }

    fn push_rename(&mut self, from: &str, to: &str) {
        self.steps.push(Step::Rename { from: from.to_string(), to: to.to_string() });
        if let Some(entry) = self.moves.iter_mut().find(|(_, current)| current == from) {
            entry.1 = to.to_string();
        } else {
            self.moves.push((from.to_string(), to.to_string()));
        }
    }

    fn push_create(&mut self, name: &str) {
        self.steps.push(Step::Create { name: name.to_string() });
    }

    fn push_delete(&mut self, name: &str) {
        self.steps.push(Step::Delete { name: name.to_string() });
    }
}

/// Renames through the context and records the step.
fn rename_logged(
    ctx: &ServiceContext,
    report: &mut ReflowReport,
    record: &ExerciseRecord,
    number: u32,
) -> Result<ExerciseRecord> {
    let updated = rename_exercise(ctx, record, number)?;
    if updated.full_name != record.full_name {
        report.push_rename(&record.full_name, &updated.full_name);
    }
    Ok(updated)
}

fn check_range(number: u32) -> Result<()> {
    if number == 0 || number >= TEMP_BASE {
        return Err(ManagerError::OutOfRange(number));
    }
    Ok(())
}

/// Positional edits assume one exercise per number.
fn ensure_no_duplicates(catalog: &[ExerciseRecord]) -> Result<()> {
    let groups = detect_duplicates(catalog);
    if groups.is_empty() {
        return Ok(());
    }
    let listing = groups
        .iter()
        .map(|g| {
            let names: Vec<&str> = g.records.iter().map(|r| r.full_name.as_str()).collect();
            format!("{}: {}", g.number, names.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(ManagerError::DuplicatesPresent(listing))
}
