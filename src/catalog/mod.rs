//! Catalog reader.
//!
//! The exercise store is the directory listing itself: every immediate
//! subdirectory named `<number>-<slug>` is one exercise. Records are fresh
//! snapshots taken on every scan and are never cached.

mod completeness;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{ManagerError, Result};
use crate::ports::FileSystem;

pub use completeness::is_complete;

/// One exercise folder as seen at scan time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    /// Number parsed from the folder name. Fractional only in transient states.
    pub number: f64,
    /// Descriptive part of the name after the first `-`.
    pub slug: String,
    /// Complete folder name.
    pub full_name: String,
    /// Location of the folder.
    pub path: PathBuf,
    /// Folder creation time.
    pub created: DateTime<Utc>,
    /// Folder modification time.
    pub modified: DateTime<Utc>,
}

impl ExerciseRecord {
    /// The integer slot this exercise occupies (`floor(number)`).
    ///
    /// Numbers too large for a `u32` clamp to `u32::MAX`. They sit far above
    /// the reserved band, so range checks reject them like any other
    /// out-of-range slot.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn position(&self) -> u32 {
        let slot = self.number.floor();
        if slot >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            slot as u32
        }
    }

    /// Returns the record as it looks after its folder moved to `number`.
    #[must_use]
    pub(crate) fn moved_to(&self, number: u32) -> Self {
        let full_name = folder_name(number, &self.slug);
        let path = self.path.with_file_name(&full_name);
        Self { number: f64::from(number), full_name, path, ..self.clone() }
    }
}

/// Builds a canonical folder name: the number zero-padded to three digits, `-`, the slug.
#[must_use]
pub fn folder_name(number: u32, slug: &str) -> String {
    format!("{number:03}-{slug}")
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+(\.\d+)?)-(.+)$").expect("folder name pattern is valid"))
}

/// Splits a folder name into its number and slug.
///
/// Returns `None` for names that are not exercises.
#[must_use]
pub fn parse_name(name: &str) -> Option<(f64, String)> {
    let caps = name_pattern().captures(name)?;
    let number = caps[1].parse::<f64>().ok()?;
    Some((number, caps[3].to_string()))
}

/// Lists every exercise folder directly under `root`, ordered by ascending number.
///
/// Non-directories and folders not matching `<number>-<slug>` are skipped.
/// A missing root yields an empty catalog.
///
/// # Errors
///
/// Returns an error if the root or a folder's timestamps cannot be read.
pub fn list_exercises(fs: &dyn FileSystem, root: &Path) -> Result<Vec<ExerciseRecord>> {
    if !fs.exists(root) {
        return Ok(Vec::new());
    }
    let entries = fs.list_dir(root).map_err(|e| ManagerError::fs("list", root, e))?;

    let mut records = Vec::new();
    for entry in entries.into_iter().filter(|e| e.is_dir) {
        let Some((number, slug)) = parse_name(&entry.name) else {
            continue;
        };
        let path = root.join(&entry.name);
        let times = fs.times(&path).map_err(|e| ManagerError::fs("stat", &path, e))?;
        records.push(ExerciseRecord {
            number,
            slug,
            full_name: entry.name,
            path,
            created: times.created,
            modified: times.modified,
        });
    }

    records.sort_by(|a, b| a.number.total_cmp(&b.number).then_with(|| a.full_name.cmp(&b.full_name)));
    Ok(records)
}
