//! Roadmap link maintenance.
//!
//! The roadmap links exercises as `[exercise N](./exercises/NNN-slug)` or
//! `(exercise N)(./exercises/NNN-slug)`. After a reflow, links to moved
//! folders are rewritten in a single pass so chained renames never apply twice.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::catalog::parse_name;
use crate::error::{ManagerError, Result};
use crate::ports::FileSystem;
use crate::reflow::ReflowReport;

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([\[(])exercise (\d+)([\])])\(\./exercises/([^)\s]+)\)")
            .expect("roadmap link pattern is valid")
    })
}

fn link(open: &str, close: &str, folder: &str) -> String {
    let number = parse_name(folder).map_or(0.0, |(n, _)| n.floor());
    format!("{open}exercise {number}{close}(./exercises/{folder})")
}

/// Rewrites links whose folder appears in `renames` (old name to new name).
#[must_use]
pub fn rewrite_links(text: &str, renames: &BTreeMap<String, String>) -> String {
    link_pattern()
        .replace_all(text, |caps: &Captures<'_>| match renames.get(&caps[4]) {
            Some(new) => link(&caps[1], &caps[3], new),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Folder names linked from `text`.
fn linked_folders(text: &str) -> Vec<String> {
    link_pattern().captures_iter(text).map(|caps| caps[4].to_string()).collect()
}

/// Brings the roadmap at `path` in line with what `report` did.
///
/// Moved folders get their links rewritten, created folders get a link
/// appended if none exists, and links to deleted folders are left in
/// place with a warning. Returns `true` if the file changed. A missing
/// roadmap is skipped.
///
/// # Errors
///
/// Returns an error if the roadmap cannot be read or written.
pub fn sync(fs: &dyn FileSystem, path: &Path, report: &ReflowReport) -> Result<bool> {
    if !fs.exists(path) {
        tracing::debug!(path = %path.display(), "no roadmap to update");
        return Ok(false);
    }
    let original = fs.read_to_string(path).map_err(|e| ManagerError::fs("read", path, e))?;

    let mut text = rewrite_links(&original, &report.net_renames());

    let linked = linked_folders(&text);
    for deleted in report.deleted() {
        if linked.iter().any(|f| f == deleted) {
            tracing::warn!(exercise = deleted, "roadmap still links to a removed exercise");
        }
    }
    for created in report.created() {
        if !linked.iter().any(|f| f == created) {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            let _ = writeln!(text, "- {}", link("[", "]", created));
        }
    }

    if text == original {
        return Ok(false);
    }
    fs.write(path, &text).map_err(|e| ManagerError::fs("write", path, e))?;
    Ok(true)
}
