//! Completeness check for a single exercise folder.

use std::path::Path;

use crate::ports::FileSystem;

/// Returns `true` if the folder holds a `*.test.js` file, another `*.js`
/// file and a `README.md`.
///
/// Unreadable folders count as incomplete.
#[must_use]
pub fn is_complete(fs: &dyn FileSystem, path: &Path) -> bool {
    let Ok(entries) = fs.list_dir(path) else {
        return false;
    };

    let files: Vec<&str> = entries.iter().filter(|e| !e.is_dir).map(|e| e.name.as_str()).collect();
    let has_test = files.iter().any(|name| name.ends_with(".test.js"));
    let has_impl = files.iter().any(|name| name.ends_with(".js") && !name.ends_with(".test.js"));
    let has_readme = files.contains(&"README.md");

    has_test && has_impl && has_readme
}
