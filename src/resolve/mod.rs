//! Conflict resolver.
//!
//! Finds exercises sharing a floored number and picks exactly one survivor
//! per group. The rest are handed back for relocation.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::catalog::{is_complete, ExerciseRecord};
use crate::context::ServiceContext;
use crate::error::{ManagerError, Result};

/// Two or more exercises sharing the same floored number.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictGroup {
    /// The contested number.
    pub number: u32,
    /// Members in catalog order.
    pub records: Vec<ExerciseRecord>,
}

/// Which rung of the cascade picked the survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The only member with recorded progress.
    Progress,
    /// The only complete member.
    Complete,
    /// The oldest member, chosen in auto mode.
    Oldest,
    /// Chosen by the operator.
    Operator,
}

/// Outcome of resolving one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The member that keeps the number.
    pub keep: ExerciseRecord,
    /// Members that must move elsewhere.
    pub shift: Vec<ExerciseRecord>,
    /// Why `keep` won.
    pub reason: Reason,
}

/// Groups the catalog by floored number, keeping only groups of two or more.
#[must_use]
pub fn detect_duplicates(catalog: &[ExerciseRecord]) -> Vec<ConflictGroup> {
    let mut by_number: BTreeMap<u32, Vec<ExerciseRecord>> = BTreeMap::new();
    for record in catalog {
        by_number.entry(record.position()).or_default().push(record.clone());
    }
    by_number
        .into_iter()
        .filter(|(_, records)| records.len() >= 2)
        .map(|(number, records)| ConflictGroup { number, records })
        .collect()
}

/// Picks one survivor for `group`.
///
/// Rungs, in order: the single member with progress, the single complete
/// member, the oldest member (auto mode only), then the operator's choice.
///
/// # Errors
///
/// Returns an error only if the operator prompt fails.
pub fn resolve_duplicate(ctx: &ServiceContext, group: &ConflictGroup) -> Result<Resolution> {
    let records = &group.records;

    let with_progress = single_match(records, |r| ctx.progress.has_progress(r));
    let (index, reason) = if let Some(i) = with_progress {
        (i, Reason::Progress)
    } else if let Some(i) = single_match(records, |r| is_complete(ctx.fs.as_ref(), &r.path)) {
        (i, Reason::Complete)
    } else if ctx.mode.auto {
        (oldest(records), Reason::Oldest)
    } else {
        (ask_operator(ctx, group)?, Reason::Operator)
    };

    tracing::info!(
        number = group.number,
        keep = %records[index].full_name,
        ?reason,
        "resolved duplicate"
    );

    let keep = records[index].clone();
    let shift = records
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r.clone())
        .collect();
    Ok(Resolution { keep, shift, reason })
}

fn single_match(records: &[ExerciseRecord], pred: impl Fn(&ExerciseRecord) -> bool) -> Option<usize> {
    let mut hits = records.iter().enumerate().filter(|(_, r)| pred(r)).map(|(i, _)| i);
    match (hits.next(), hits.next()) {
        (Some(i), None) => Some(i),
        _ => None,
    }
}

/// Earliest `created` wins; equal timestamps fall back to the smallest name.
fn oldest(records: &[ExerciseRecord]) -> usize {
    records
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.created.cmp(&b.created).then_with(|| a.full_name.cmp(&b.full_name)))
        .map_or(0, |(i, _)| i)
}

fn ask_operator(ctx: &ServiceContext, group: &ConflictGroup) -> Result<usize> {
    let count = group.records.len();
    let mut listing = format!("Exercise number {} is used by {count} folders:\n", group.number);
    for (i, record) in group.records.iter().enumerate() {
        let _ = writeln!(
            listing,
            "  {}. {} (created {}, modified {})",
            i + 1,
            record.full_name,
            record.created.format("%Y-%m-%d %H:%M:%S"),
            record.modified.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    let question = format!("{listing}Which one keeps number {}? [1-{count}]: ", group.number);

    let mut ask = question.clone();
    loop {
        let answer = ctx.prompt.ask(&ask).map_err(ManagerError::Prompt)?;
        match answer.trim().parse::<usize>() {
            Ok(choice) if (1..=count).contains(&choice) => return Ok(choice - 1),
            _ => ask = format!("Invalid choice {:?}. {question}", answer.trim()),
        }
    }
}
