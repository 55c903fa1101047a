//! Duplicate resolution and dense renumbering.

use std::collections::BTreeSet;
use std::path::Path;

use super::{rename_logged, ReflowReport, TEMP_BASE};
use crate::catalog::{folder_name, list_exercises, ExerciseRecord};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::resolve::{detect_duplicates, resolve_duplicate};

/// Hands out free numbers from the reserved band, skipping any already in use.
struct TempNumbers {
    taken: BTreeSet<u32>,
    next: u32,
}

impl TempNumbers {
    fn new(catalog: &[ExerciseRecord]) -> Self {
        let taken = catalog.iter().map(ExerciseRecord::position).filter(|n| *n >= TEMP_BASE).collect();
        Self { taken, next: TEMP_BASE }
    }

    fn take(&mut self) -> u32 {
        while self.taken.contains(&self.next) {
            self.next += 1;
        }
        let number = self.next;
        self.taken.insert(number);
        number
    }
}

/// Resolves every duplicate number, then renumbers the catalog to `1..=N`.
///
/// Losers of each conflict are parked on free temporary numbers first, so
/// two conflicting folders never contend for the same path. The conflict-free
/// catalog is then rescanned and renamed in place, lowest first; only folders
/// whose name differs from the padded `NNN-slug` form are touched. Running it on
/// an already dense catalog changes nothing.
///
/// # Errors
///
/// Returns an error if a conflict prompt or any filesystem call fails.
pub fn cleanup(ctx: &ServiceContext, root: &Path) -> Result<ReflowReport> {
    let mut report = ReflowReport::default();

    let catalog = list_exercises(ctx.fs.as_ref(), root)?;
    let mut temps = TempNumbers::new(&catalog);
    for group in detect_duplicates(&catalog) {
        let resolution = resolve_duplicate(ctx, &group)?;
        for loser in &resolution.shift {
            rename_logged(ctx, &mut report, loser, temps.take())?;
        }
    }

    let catalog = list_exercises(ctx.fs.as_ref(), root)?;
    let targets: Vec<(&ExerciseRecord, u32)> = catalog.iter().zip(1..).collect();

    // Only a folder numbered 0 (and the run directly after it) can need to move up;
    // those go highest first, everything else moves down lowest first.
    let (up, down): (Vec<_>, Vec<_>) =
        targets.into_iter().partition(|(record, target)| *target > record.position());
    for (record, target) in up.into_iter().rev().chain(down) {
        if record.full_name != folder_name(target, &record.slug) {
            rename_logged(ctx, &mut report, record, target)?;
        }
    }

    tracing::info!(
        exercises = catalog.len(),
        renamed = report.net_renames().len(),
        "cleanup finished"
    );
    Ok(report)
}
