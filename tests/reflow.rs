//! Scenario and property tests for the renumbering engine, run against an
//! in-memory tree that checks the catalog after every folder rename.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use exercise_manager::adapters::memory::{MemFileSystem, ScriptedPrompt, StaticProgress};
use exercise_manager::catalog::{list_exercises, ExerciseRecord};
use exercise_manager::config::ManagerConfig;
use exercise_manager::context::{RunMode, ServiceContext};
use exercise_manager::ports::{DirEntry, EntryTimes, FileSystem, PortError};
use exercise_manager::reflow::{self, RemoveOutcome};
use exercise_manager::resolve::detect_duplicates;

const ROOT: &str = "/ex";

/// Wraps [`MemFileSystem`] and records, after every rename directly below
/// the exercises root, how many folders share a number with another.
struct CollisionWatch {
    inner: MemFileSystem,
    shared_counts: Arc<Mutex<Vec<usize>>>,
}

fn shared(fs: &dyn FileSystem) -> usize {
    let catalog = list_exercises(fs, Path::new(ROOT)).unwrap();
    detect_duplicates(&catalog).iter().map(|g| g.records.len()).sum()
}

impl FileSystem for CollisionWatch {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.inner.read_to_string(path)
    }
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.inner.write(path, contents)
    }
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError> {
        self.inner.list_dir(path)
    }
    fn times(&self, path: &Path) -> Result<EntryTimes, PortError> {
        self.inner.times(path)
    }
    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError> {
        self.inner.rename(from, to)?;
        if from.parent() == Some(Path::new(ROOT)) {
            self.shared_counts.lock().unwrap().push(shared(&self.inner));
        }
        Ok(())
    }
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        self.inner.create_dir_all(path)
    }
    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError> {
        self.inner.remove_dir_all(path)
    }
}

struct Harness {
    fs: MemFileSystem,
    ctx: ServiceContext,
    shared_counts: Arc<Mutex<Vec<usize>>>,
}

impl Harness {
    /// Folders are created in the given order, one second apart.
    fn new(names: &[&str], mode: RunMode) -> Self {
        let fs = MemFileSystem::new();
        for name in names {
            let dir = PathBuf::from(ROOT).join(name);
            fs.write(&dir.join(format!("{name}.js")), "export {};\n").unwrap();
        }
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for (i, name) in names.iter().enumerate() {
            let at = start + Duration::seconds(i64::try_from(i).unwrap());
            fs.set_times(&PathBuf::from(ROOT).join(name), at, at);
        }

        let shared_counts = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = ServiceContext::in_memory(fs.clone(), mode);
        ctx.fs = Box::new(CollisionWatch { inner: fs.clone(), shared_counts: Arc::clone(&shared_counts) });
        Self { fs, ctx, shared_counts }
    }

    fn auto(names: &[&str]) -> Self {
        Self::new(names, RunMode { dry_run: false, auto: true })
    }

    fn catalog(&self) -> Vec<ExerciseRecord> {
        list_exercises(&self.fs, Path::new(ROOT)).unwrap()
    }

    fn names(&self) -> Vec<String> {
        self.catalog().into_iter().map(|r| r.full_name).collect()
    }

    fn slugs(&self) -> Vec<String> {
        self.catalog().into_iter().map(|r| r.slug).collect()
    }

    fn shared_counts(&self) -> Vec<usize> {
        self.shared_counts.lock().unwrap().clone()
    }

    fn make_complete(&self, name: &str) {
        let dir = PathBuf::from(ROOT).join(name);
        self.fs.write(&dir.join(format!("{name}.test.js")), "").unwrap();
        self.fs.write(&dir.join("README.md"), "").unwrap();
    }
}

#[test]
fn duplicate_with_complete_folder_keeps_complete_one() {
    let h = Harness::auto(&["005-foo", "005-bar"]);
    h.make_complete("005-bar");

    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    assert_eq!(h.names(), vec!["001-bar", "002-foo"]);
}

#[test]
fn insert_scenario() {
    let h = Harness::auto(&["001-a", "002-b", "003-c", "004-d"]);
    reflow::insert(&h.ctx, Path::new(ROOT), 3, "new-topic").unwrap();

    assert_eq!(h.names(), vec!["001-a", "002-b", "003-new-topic", "004-c", "005-d"]);
    assert!(h.shared_counts().iter().all(|&n| n == 0));
}

#[test]
fn remove_scenario() {
    let h = Harness::auto(&["001-a", "002-b", "003-c"]);
    let outcome = reflow::remove(&h.ctx, Path::new(ROOT), 2).unwrap();

    assert!(matches!(outcome, RemoveOutcome::Removed(_)));
    assert_eq!(h.names(), vec!["001-a", "002-c"]);
    assert!(h.shared_counts().iter().all(|&n| n == 0));
}

#[test]
fn swap_scenario() {
    let h = Harness::auto(&["001-a", "002-b", "003-c"]);
    reflow::swap(&h.ctx, Path::new(ROOT), 1, 3).unwrap();

    assert_eq!(h.names(), vec!["001-c", "002-b", "003-a"]);
    assert_eq!(h.shared_counts(), vec![0, 0, 0, 0]);
}

#[test]
fn cleanup_scenario_closes_gaps() {
    let h = Harness::auto(&["001-a", "003-b", "007-c"]);
    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();

    assert_eq!(h.names(), vec!["001-a", "002-b", "003-c"]);
    assert!(h.shared_counts().iter().all(|&n| n == 0));
}

#[test]
fn cleanup_never_adds_collisions() {
    let h = Harness::auto(&["000-zero", "001-a", "001-b", "002-c", "002-d", "002-e", "9000-stale", "12-f"]);
    let before = shared(&h.fs);
    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();

    let mut last = before;
    for count in h.shared_counts() {
        assert!(count <= last, "collisions grew from {last} to {count}");
        last = count;
    }
    assert_eq!(last, 0);

    let positions: Vec<u32> = h.catalog().iter().map(ExerciseRecord::position).collect();
    assert_eq!(positions, (1..=8).collect::<Vec<_>>());
}

#[test]
fn cleanup_is_idempotent() {
    let h = Harness::auto(&["002-x", "002-y", "004-z", "4.5-w"]);
    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    let once = h.names();

    let report = reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    assert!(report.is_empty());
    assert_eq!(h.names(), once);
}

#[test]
fn insert_and_remove_preserve_relative_order() {
    let h = Harness::auto(&["001-a", "002-b", "003-c", "004-d", "005-e"]);
    reflow::insert(&h.ctx, Path::new(ROOT), 2, "new").unwrap();
    assert_eq!(h.slugs(), vec!["a", "new", "b", "c", "d", "e"]);

    reflow::remove(&h.ctx, Path::new(ROOT), 4).unwrap();
    assert_eq!(h.slugs(), vec!["a", "new", "b", "d", "e"]);
}

#[test]
fn rename_rewrites_embedded_tokens() {
    let h = Harness::auto(&["003-loops"]);
    let dir = PathBuf::from(ROOT).join("003-loops");
    h.fs.write(&dir.join("003-loops.test.js"), "import { solve } from './003-loops.js';\n").unwrap();
    h.fs.write(&dir.join("003-loops-solution.js"), "").unwrap();
    h.fs.write(&dir.join("hints-003-loops.md"), "").unwrap();

    let record = h.catalog().remove(0);
    let moved = reflow::rename_exercise(&h.ctx, &record, 12).unwrap();

    assert_eq!(moved.full_name, "012-loops");
    let moved_dir = PathBuf::from(ROOT).join("012-loops");
    assert!(h.fs.exists(&moved_dir.join("012-loops.js")));
    assert!(h.fs.exists(&moved_dir.join("012-loops-solution.js")));
    assert!(h.fs.exists(&moved_dir.join("hints-012-loops.md")));
    let test = h.fs.read_to_string(&moved_dir.join("012-loops.test.js")).unwrap();
    assert_eq!(test, "import { solve } from './012-loops.js';\n");
}

#[test]
fn auto_mode_picks_oldest_regardless_of_order() {
    // Listed alphabetically, but "late" was created after "early".
    let h = Harness::auto(&["004-zz-early", "004-aa-late"]);
    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    assert_eq!(h.names(), vec!["001-zz-early", "002-aa-late"]);
}

#[test]
fn progress_outranks_age_and_completeness() {
    let mut h = Harness::auto(&["002-old", "002-new"]);
    h.make_complete("002-old");
    let winner = h.catalog().into_iter().find(|r| r.slug == "new").unwrap();
    h.ctx.progress = Box::new(StaticProgress::new([winner.full_name]));

    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    assert_eq!(h.names(), vec!["001-new", "002-old"]);
}

#[test]
fn interactive_choice_decides_tie() {
    let mut h = Harness::new(&["003-a", "003-b"], RunMode::default());
    h.ctx.prompt = Box::new(ScriptedPrompt::new(["7", "2"]));

    reflow::cleanup(&h.ctx, Path::new(ROOT)).unwrap();
    assert_eq!(h.names(), vec!["001-b", "002-a"]);
}

#[test]
fn dry_run_on_disk_reports_without_touching_anything() {
    let dir = tempfile::tempdir().unwrap();
    let exercises = dir.path().join("exercises");
    for name in ["001-a", "002-b", "004-c"] {
        std::fs::create_dir_all(exercises.join(name)).unwrap();
        std::fs::write(exercises.join(name).join(format!("{name}.js")), "").unwrap();
    }
    let config = ManagerConfig {
        exercises_dir: exercises.clone(),
        roadmap: dir.path().join("Roadmap.md"),
        progress_file: dir.path().join(".progress.json"),
        journal: None,
    };
    let ctx = ServiceContext::live(&config, RunMode { dry_run: true, auto: false }, "insert").unwrap();

    let report = reflow::insert(&ctx, &exercises, 2, "new").unwrap();
    let report_cleanup = reflow::cleanup(&ctx, &exercises).unwrap();

    assert_eq!(report.net_renames().len(), 2);
    assert_eq!(report.created().collect::<Vec<_>>(), vec!["002-new"]);
    assert_eq!(report_cleanup.net_renames()["005-c"], "004-c");

    let mut on_disk: Vec<String> = std::fs::read_dir(&exercises)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    on_disk.sort();
    assert_eq!(on_disk, vec!["001-a", "002-b", "004-c"]);
    assert!(!exercises.join("002-new").exists());
}
