//! `exercise-manager list` command.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::catalog::{is_complete, list_exercises, ExerciseRecord};
use crate::config::ManagerConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::ports::FileSystem;
use crate::resolve::detect_duplicates;

/// Execute the `list` command.
///
/// Prints one row per exercise folder with its number, name, a completeness
/// marker and a flag for numbers shared with another folder.
///
/// # Errors
///
/// Returns an error if the exercises directory cannot be listed.
pub fn run(ctx: &ServiceContext, config: &ManagerConfig) -> Result<()> {
    let catalog = list_exercises(ctx.fs.as_ref(), &config.exercises_dir)?;
    if catalog.is_empty() {
        println!("No exercises found in {}.", config.exercises_dir.display());
        return Ok(());
    }
    print!("{}", format_table(ctx.fs.as_ref(), &catalog));
    Ok(())
}

/// Renders the listing table, including the summary footer.
#[must_use]
pub fn format_table(fs: &dyn FileSystem, catalog: &[ExerciseRecord]) -> String {
    let conflicted: BTreeSet<String> = detect_duplicates(catalog)
        .into_iter()
        .flat_map(|g| g.records)
        .map(|r| r.full_name)
        .collect();

    let mut rows: Vec<(String, String, &str, &str)> = Vec::new();
    let mut complete = 0;
    for record in catalog {
        let done = is_complete(fs, &record.path);
        complete += usize::from(done);
        rows.push((
            record.position().to_string(),
            record.full_name.clone(),
            if done { "✓" } else { "✗" },
            if conflicted.contains(&record.full_name) { "duplicate" } else { "" },
        ));
    }

    let num_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(1).max(1);
    let name_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(8).max(8);

    let mut out = String::new();
    let _ = writeln!(out, "{:>num_width$}  {:<name_width$}  {}", "#", "EXERCISE", "COMPLETE");
    let _ = writeln!(out, "{:->num_width$}  {:-<name_width$}  {:-<8}", "", "", "");
    for (number, name, marker, note) in &rows {
        let line = format!("{number:>num_width$}  {name:<name_width$}  {marker}");
        if note.is_empty() {
            let _ = writeln!(out, "{line}");
        } else {
            let _ = writeln!(out, "{line}         {note}");
        }
    }

    let _ = write!(out, "\n{} exercise(s), {complete} complete", rows.len());
    if conflicted.is_empty() {
        let _ = writeln!(out, ".");
    } else {
        let _ = writeln!(out, ", {} sharing a number. Run `cleanup` to fix.", conflicted.len());
    }
    out
}
