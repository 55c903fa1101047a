//! Positional edits: insert, remove, swap.

use std::path::Path;

use super::{check_range, ensure_no_duplicates, rename_logged, ReflowReport, SWAP_SLOTS};
use crate::catalog::{folder_name, list_exercises, ExerciseRecord};
use crate::context::ServiceContext;
use crate::error::{ManagerError, Result};
use crate::templates;

/// Shifts every exercise at or after `position` up by one, then creates a
/// placeholder exercise named `slug` at `position`.
///
/// Shifts run highest number first, so each target slot has already been
/// vacated when it is renamed into.
///
/// # Errors
///
/// Returns an error for an invalid slug or position, a catalog with
/// duplicate numbers, or any filesystem failure.
pub fn insert(ctx: &ServiceContext, root: &Path, position: u32, slug: &str) -> Result<ReflowReport> {
    templates::validate_slug(slug)?;
    check_range(position)?;

    let catalog = list_exercises(ctx.fs.as_ref(), root)?;
    ensure_no_duplicates(&catalog)?;

    let shifted: Vec<&ExerciseRecord> = catalog.iter().filter(|r| r.position() >= position).collect();
    if let Some(last) = shifted.last() {
        let top = last.position().checked_add(1).ok_or(ManagerError::OutOfRange(last.position()))?;
        check_range(top)?;
    }
    let max = catalog.iter().map(ExerciseRecord::position).max().unwrap_or(0);
    if position > max.saturating_add(1) {
        tracing::warn!(position, last = max, "inserting past the end leaves a gap");
    }

    let mut report = ReflowReport::default();
    for record in shifted.into_iter().rev() {
        rename_logged(ctx, &mut report, record, record.position() + 1)?;
    }

    let name = folder_name(position, slug);
    let dir = root.join(&name);
    if ctx.fs.exists(&dir) {
        return Err(ManagerError::Occupied { from: format!("new exercise {slug}"), to: name });
    }
    ctx.fs.create_dir_all(&dir).map_err(|e| ManagerError::fs("create", &dir, e))?;
    for file in templates::exercise_files(position, slug) {
        let path = dir.join(&file.name);
        ctx.fs.write(&path, &file.contents).map_err(|e| ManagerError::fs("write", &path, e))?;
    }
    report.push_create(&name);

    tracing::info!(position, slug, shifted = report.net_renames().len(), "inserted exercise");
    Ok(report)
}

/// Result of [`remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The exercise was deleted and later exercises moved down.
    Removed(ReflowReport),
    /// The operator declined the confirmation; nothing changed.
    Cancelled,
}

/// Deletes the exercise at `number` and shifts every later exercise down by one.
///
/// Asks for confirmation unless running in auto or dry-run mode. Shifts
/// run lowest number first, so each slot is vacated before it is filled.
///
/// # Errors
///
/// Returns an error if no exercise has that number, the catalog has
/// duplicates, the prompt fails, or any filesystem call fails.
pub fn remove(ctx: &ServiceContext, root: &Path, number: u32) -> Result<RemoveOutcome> {
    check_range(number)?;

    let catalog = list_exercises(ctx.fs.as_ref(), root)?;
    ensure_no_duplicates(&catalog)?;
    let target = catalog
        .iter()
        .find(|r| r.position() == number)
        .ok_or(ManagerError::NotFound(number))?;

    if !ctx.mode.auto && !ctx.mode.dry_run {
        let question = format!("Delete {} and shift later exercises down? [y/N]: ", target.full_name);
        let answer = ctx.prompt.ask(&question).map_err(ManagerError::Prompt)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            tracing::info!(exercise = %target.full_name, "removal cancelled");
            return Ok(RemoveOutcome::Cancelled);
        }
    }

    let mut report = ReflowReport::default();
    ctx.fs.remove_dir_all(&target.path).map_err(|e| ManagerError::fs("delete", &target.path, e))?;
    report.push_delete(&target.full_name);

    for record in catalog.iter().filter(|r| r.position() > number) {
        rename_logged(ctx, &mut report, record, record.position() - 1)?;
    }

    tracing::info!(number, shifted = report.net_renames().len(), "removed exercise");
    Ok(RemoveOutcome::Removed(report))
}

/// Exchanges the positions of the exercises numbered `first` and `second`.
///
/// Both are staged through [`SWAP_SLOTS`] first, so neither ever targets
/// the other's still-occupied slot.
///
/// # Errors
///
/// Returns an error if either number is missing or out of range, the
/// catalog has duplicates, or any filesystem call fails.
pub fn swap(ctx: &ServiceContext, root: &Path, first: u32, second: u32) -> Result<ReflowReport> {
    check_range(first)?;
    check_range(second)?;

    let catalog = list_exercises(ctx.fs.as_ref(), root)?;
    ensure_no_duplicates(&catalog)?;
    let find = |n: u32| catalog.iter().find(|r| r.position() == n).ok_or(ManagerError::NotFound(n));
    let a = find(first)?;
    let b = find(second)?;

    let mut report = ReflowReport::default();
    if first == second {
        return Ok(report);
    }
    let staged_a = rename_logged(ctx, &mut report, a, SWAP_SLOTS.0)?;
    let staged_b = rename_logged(ctx, &mut report, b, SWAP_SLOTS.1)?;
    rename_logged(ctx, &mut report, &staged_a, second)?;
    rename_logged(ctx, &mut report, &staged_b, first)?;

    tracing::info!(first, second, "swapped exercises");
    Ok(report)
}
