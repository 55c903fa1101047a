//! Service context bundling all port trait objects.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{JsonProgressStore, LiveClock, LiveFileSystem, StdinPrompt};
use crate::adapters::memory::{MemFileSystem, ScriptedPrompt, StaticProgress};
use crate::adapters::recording::RecordingFileSystem;
use crate::config::ManagerConfig;
use crate::error::{ManagerError, Result};
use crate::journal::JournalRecorder;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::progress::ProgressTracker;
use crate::ports::prompt::Prompt;

/// How a command should behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMode {
    /// Report intended actions without touching the disk.
    pub dry_run: bool,
    /// Resolve conflicts without asking (oldest wins) and skip confirmations.
    pub auto: bool,
}

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, dry-run, in-memory).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// The directory tree holding the exercises and the roadmap.
    pub fs: Box<dyn FileSystem>,
    /// Operator prompt for conflict choices and confirmations.
    pub prompt: Box<dyn Prompt>,
    /// Learner progress, the first conflict tie-break.
    pub progress: Box<dyn ProgressTracker>,
    /// Dry-run and auto flags for this run.
    pub mode: RunMode,
    /// Optional journal recorder; written by [`ServiceContext::finish`].
    journal: Option<Arc<Mutex<JournalRecorder>>>,
}

impl ServiceContext {
    /// Creates a context over the real disk, stdin and the progress file.
    ///
    /// In dry-run mode the filesystem port is an in-memory snapshot of the
    /// exercises directory and the roadmap, so the real algorithm runs but
    /// nothing on disk changes. When `config.journal` is set, mutating calls
    /// are journaled under `command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the progress file is malformed or the dry-run
    /// snapshot cannot be taken.
    pub fn live(config: &ManagerConfig, mode: RunMode, command: &str) -> Result<Self> {
        let progress = JsonProgressStore::load(&LiveFileSystem, &config.progress_file)?;

        let mut fs: Box<dyn FileSystem> = if mode.dry_run {
            let roots = [config.exercises_dir.as_path(), config.roadmap.as_path()];
            let snapshot = MemFileSystem::snapshot(&LiveFileSystem, &roots, Arc::new(LiveClock))
                .map_err(|e| ManagerError::fs("snapshot", &config.exercises_dir, e))?;
            Box::new(snapshot)
        } else {
            Box::new(LiveFileSystem)
        };

        let journal = config.journal.as_ref().map(|path| {
            Arc::new(Mutex::new(JournalRecorder::new(path, command, mode.dry_run)))
        });
        if let Some(recorder) = &journal {
            fs = Box::new(RecordingFileSystem::new(fs, Arc::clone(recorder)));
        }

        Ok(Self {
            clock: Box::new(LiveClock),
            fs,
            prompt: Box::new(StdinPrompt),
            progress: Box::new(progress),
            mode,
            journal,
        })
    }

    /// Creates a context over an in-memory tree with no scripted answers
    /// and no progress. Replace `prompt` or `progress` as a test needs.
    #[must_use]
    pub fn in_memory(fs: MemFileSystem, mode: RunMode) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(fs),
            prompt: Box::new(ScriptedPrompt::default()),
            progress: Box::new(StaticProgress::none()),
            mode,
            journal: None,
        }
    }

    /// Consumes the context and writes the journal, if one was requested.
    ///
    /// Returns the journal path when one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal file cannot be written.
    pub fn finish(self) -> std::result::Result<Option<PathBuf>, String> {
        let Self { clock, fs, journal, .. } = self;
        // Release the recording adapter's reference first.
        drop(fs);

        let Some(recorder) = journal else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "Journal recorder still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Journal lock poisoned: {e}"))?;
        recorder
            .finish(clock.now())
            .map(Some)
            .map_err(|e| format!("Failed to write journal: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_in(dir: &Path) -> ManagerConfig {
        ManagerConfig {
            exercises_dir: dir.join("exercises"),
            roadmap: dir.join("Roadmap.md"),
            progress_file: dir.join(".progress.json"),
            journal: None,
        }
    }

    #[test]
    fn dry_run_context_never_touches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(config.exercises_dir.join("001-a")).unwrap();

        let mode = RunMode { dry_run: true, auto: false };
        let ctx = ServiceContext::live(&config, mode, "test").unwrap();
        ctx.fs
            .rename(&config.exercises_dir.join("001-a"), &config.exercises_dir.join("002-a"))
            .unwrap();

        assert!(ctx.fs.exists(&config.exercises_dir.join("002-a")));
        assert!(config.exercises_dir.join("001-a").exists());
        assert!(!config.exercises_dir.join("002-a").exists());
    }

    #[test]
    fn dry_run_stamps_new_folders_with_the_current_time() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.exercises_dir).unwrap();

        let before = chrono::Utc::now();
        let ctx = ServiceContext::live(&config, RunMode { dry_run: true, auto: false }, "insert").unwrap();
        let new_dir = config.exercises_dir.join("001-new");
        ctx.fs.create_dir_all(&new_dir).unwrap();

        assert!(ctx.fs.times(&new_dir).unwrap().created >= before);
        assert!(!new_dir.exists());
    }

    #[test]
    fn journal_is_written_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.journal = Some(dir.path().join("journal.yaml"));
        std::fs::create_dir_all(&config.exercises_dir).unwrap();

        let ctx = ServiceContext::live(&config, RunMode::default(), "list").unwrap();
        ctx.fs.create_dir_all(&config.exercises_dir.join("001-a")).unwrap();
        let written = ctx.finish().unwrap();

        assert_eq!(written.as_deref(), Some(dir.path().join("journal.yaml").as_path()));
        let content = std::fs::read_to_string(dir.path().join("journal.yaml")).unwrap();
        assert!(content.contains("command: list"));
        assert!(content.contains("create_dir"));
    }

    #[test]
    fn finish_without_journal_is_noop() {
        let ctx = ServiceContext::in_memory(MemFileSystem::new(), RunMode::default());
        assert_eq!(ctx.finish().unwrap(), None);
    }

    #[test]
    fn malformed_progress_file_fails_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.progress_file, "[1, 2").unwrap();
        assert!(ServiceContext::live(&config, RunMode::default(), "list").is_err());
    }
}
