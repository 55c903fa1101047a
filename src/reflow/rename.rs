//! Single-exercise rename.

use std::path::Path;

use crate::catalog::{folder_name, ExerciseRecord};
use crate::context::ServiceContext;
use crate::error::{ManagerError, Result};
use crate::ports::FileSystem;

/// Moves an exercise to `new_number` and returns the record for its new location.
///
/// The folder becomes `NNN-slug` with `NNN` the zero-padded new number. Files
/// inside whose names embed the old folder name (`<old>.js`,
/// `<old>-solution.js`, `notes-<old>.md`, ...) get the new name in its
/// place, and `from './<old>.js'` imports in test files are rewritten.
/// Renaming onto an existing path is refused.
///
/// The context's filesystem decides what "moves" means: in a dry run it is
/// an in-memory sandbox, so the disk stays untouched and the returned record
/// describes the hypothetical result.
///
/// # Errors
///
/// Returns [`ManagerError::Occupied`] if the target exists, or a filesystem
/// error if any rename, read or write fails. Steps already applied stay applied.
pub fn rename_exercise(
    ctx: &ServiceContext,
    record: &ExerciseRecord,
    new_number: u32,
) -> Result<ExerciseRecord> {
    let updated = record.moved_to(new_number);
    if updated.full_name == record.full_name {
        return Ok(record.clone());
    }

    let fs = ctx.fs.as_ref();
    if fs.exists(&updated.path) {
        return Err(ManagerError::Occupied {
            from: record.full_name.clone(),
            to: updated.full_name.clone(),
        });
    }
    fs.rename(&record.path, &updated.path)
        .map_err(|e| ManagerError::fs("rename", &record.path, e))?;

    // Fractional or unpadded folders may still hold files named canonically.
    let mut old_tokens = vec![record.full_name.clone()];
    let canonical = folder_name(record.position(), &record.slug);
    if canonical != record.full_name {
        old_tokens.push(canonical);
    }
    rename_inner_files(fs, &updated.path, &old_tokens, &updated.full_name)?;

    tracing::debug!(from = %record.full_name, to = %updated.full_name, "renamed exercise");
    Ok(updated)
}

/// Replaces each occurrence of `token` in `name` with `new_token`.
///
/// An occurrence glued to a letter or digit on either side belongs to a
/// different name (`001-ab.js` for token `001-a`) and is left alone.
/// Returns `None` when nothing was replaced.
fn replace_token(name: &str, token: &str, new_token: &str) -> Option<String> {
    let glued = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    let mut out = String::with_capacity(name.len());
    let mut copied = 0;
    for (at, _) in name.match_indices(token) {
        let end = at + token.len();
        if glued(name[..at].chars().next_back()) || glued(name[end..].chars().next()) {
            continue;
        }
        out.push_str(&name[copied..at]);
        out.push_str(new_token);
        copied = end;
    }
    if copied == 0 {
        return None;
    }
    out.push_str(&name[copied..]);
    Some(out)
}

fn rename_inner_files(
    fs: &dyn FileSystem,
    dir: &Path,
    old_tokens: &[String],
    new_token: &str,
) -> Result<()> {
    let entries = fs.list_dir(dir).map_err(|e| ManagerError::fs("list", dir, e))?;
    for entry in entries.into_iter().filter(|e| !e.is_dir) {
        let Some((old_token, new_name)) = old_tokens
            .iter()
            .find_map(|t| replace_token(&entry.name, t, new_token).map(|n| (t.as_str(), n)))
        else {
            continue;
        };
        let from = dir.join(&entry.name);
        let to = dir.join(&new_name);
        fs.rename(&from, &to).map_err(|e| ManagerError::fs("rename", &from, e))?;

        if new_name.ends_with(".test.js") {
            rewrite_imports(fs, &to, old_token, new_token)?;
        }
    }
    Ok(())
}

/// Rewrites `from './<old>.js'` to `from './<new>.js'`; nothing else.
///
/// Any other mention of the old name is left alone and logged.
fn rewrite_imports(fs: &dyn FileSystem, path: &Path, old_token: &str, new_token: &str) -> Result<()> {
    let source = fs.read_to_string(path).map_err(|e| ManagerError::fs("read", path, e))?;
    let rewritten =
        source.replace(&format!("from './{old_token}.js'"), &format!("from './{new_token}.js'"));

    if rewritten.replace(new_token, "").contains(old_token) {
        tracing::warn!(
            file = %path.display(),
            old = old_token,
            "test file references the old name in a form that was not rewritten"
        );
    }

    if rewritten != source {
        fs.write(path, &rewritten).map_err(|e| ManagerError::fs("write", path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemFileSystem;
    use crate::catalog::list_exercises;
    use crate::context::RunMode;

    fn setup(fs: &MemFileSystem, name: &str) -> ExerciseRecord {
        let dir = Path::new("/ex").join(name);
        fs.write(&dir.join(format!("{name}.js")), "export function solve() {}\n").unwrap();
        fs.write(
            &dir.join(format!("{name}.test.js")),
            &format!("import {{ solve }} from './{name}.js';\ntest('x', () => solve());\n"),
        )
        .unwrap();
        fs.write(&dir.join("README.md"), "# readme").unwrap();
        list_exercises(fs, Path::new("/ex"))
            .unwrap()
            .into_iter()
            .find(|r| r.full_name == name)
            .unwrap()
    }

    fn file_names(fs: &MemFileSystem, dir: &str) -> Vec<String> {
        fs.list_dir(Path::new(dir)).unwrap().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn renames_folder_files_and_imports() {
        let fs = MemFileSystem::new();
        let record = setup(&fs, "003-loops");
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());

        let updated = rename_exercise(&ctx, &record, 12).unwrap();

        assert_eq!(updated.full_name, "012-loops");
        assert_eq!(updated.path, Path::new("/ex/012-loops"));
        assert!(!fs.exists(Path::new("/ex/003-loops")));
        assert_eq!(file_names(&fs, "/ex/012-loops"), vec!["012-loops.js", "012-loops.test.js", "README.md"]);
        let test = fs.read_to_string(Path::new("/ex/012-loops/012-loops.test.js")).unwrap();
        assert!(test.contains("from './012-loops.js'"));
        assert!(!test.contains("003-loops"));
    }

    #[test]
    fn same_number_is_a_noop() {
        let fs = MemFileSystem::new();
        let record = setup(&fs, "004-x");
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());
        assert_eq!(rename_exercise(&ctx, &record, 4).unwrap(), record);
    }

    #[test]
    fn refuses_occupied_target() {
        let fs = MemFileSystem::new();
        let record = setup(&fs, "001-a");
        fs.create_dir_all(Path::new("/ex/002-a")).unwrap();
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());

        let err = rename_exercise(&ctx, &record, 2).unwrap_err();
        assert!(matches!(err, ManagerError::Occupied { .. }));
        assert!(fs.exists(Path::new("/ex/001-a/001-a.js")));
    }

    #[test]
    fn fractional_folder_normalizes_canonical_file_names() {
        let fs = MemFileSystem::new();
        fs.write(Path::new("/ex/12.5-foo/012-foo.js"), "").unwrap();
        fs.write(Path::new("/ex/12.5-foo/012-foo.test.js"), "import x from './012-foo.js';").unwrap();
        let record = list_exercises(&fs, Path::new("/ex")).unwrap().remove(0);
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());

        rename_exercise(&ctx, &record, 13).unwrap();

        assert_eq!(file_names(&fs, "/ex/013-foo"), vec!["013-foo.js", "013-foo.test.js"]);
        let test = fs.read_to_string(Path::new("/ex/013-foo/013-foo.test.js")).unwrap();
        assert_eq!(test, "import x from './013-foo.js';");
    }

    #[test]
    fn unrecognized_reference_shapes_are_left_alone() {
        let fs = MemFileSystem::new();
        fs.write(
            Path::new("/ex/001-a/001-a.test.js"),
            "const a = require(\"./001-a.js\");\nimport b from './001-a.js';\n",
        )
        .unwrap();
        let record = list_exercises(&fs, Path::new("/ex")).unwrap().remove(0);
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());

        rename_exercise(&ctx, &record, 2).unwrap();

        let test = fs.read_to_string(Path::new("/ex/002-a/002-a.test.js")).unwrap();
        assert!(test.contains("require(\"./001-a.js\")"));
        assert!(test.contains("from './002-a.js'"));
    }

    #[test]
    fn every_file_embedding_the_token_follows_the_folder() {
        let fs = MemFileSystem::new();
        for file in ["005-foo.js", "005-foo-solution.js", "solution-005-foo.js", "005-foobar.js", "notes.md"] {
            fs.write(&Path::new("/ex/005-foo").join(file), "").unwrap();
        }
        let record = list_exercises(&fs, Path::new("/ex")).unwrap().remove(0);
        let ctx = ServiceContext::in_memory(fs.clone(), RunMode::default());

        rename_exercise(&ctx, &record, 7).unwrap();

        assert_eq!(
            file_names(&fs, "/ex/007-foo"),
            vec!["005-foobar.js", "007-foo-solution.js", "007-foo.js", "notes.md", "solution-007-foo.js"]
        );
    }

    #[test]
    fn token_replacement_respects_name_boundaries() {
        assert_eq!(replace_token("001-a.test.js", "001-a", "002-a").as_deref(), Some("002-a.test.js"));
        assert_eq!(replace_token("001-a-solution.js", "001-a", "002-a").as_deref(), Some("002-a-solution.js"));
        assert_eq!(replace_token("notes-001-a.js", "001-a", "002-a").as_deref(), Some("notes-002-a.js"));
        assert_eq!(replace_token("001-ab.js", "001-a", "002-a"), None);
        assert_eq!(replace_token("1001-a.js", "001-a", "002-a"), None);
    }
}
