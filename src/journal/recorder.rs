//! Collects journal entries and writes them as YAML.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::format::{Journal, JournalEntry};

/// Records mutations and writes them as a YAML journal file.
#[derive(Debug)]
pub struct JournalRecorder {
    path: PathBuf,
    command: String,
    dry_run: bool,
    entries: Vec<JournalEntry>,
    next_seq: u64,
}

impl JournalRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, command: impl Into<String>, dry_run: bool) -> Self {
        Self { path: path.into(), command: command.into(), dry_run, entries: Vec::new(), next_seq: 0 }
    }

    /// Record one call. The `seq` field is assigned automatically.
    pub fn record(&mut self, op: &str, path: String, to: Option<String>, error: Option<String>) {
        self.entries.push(JournalEntry { seq: self.next_seq, op: op.to_string(), path, to, error });
        self.next_seq += 1;
    }

    /// Entries recorded so far.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Finish recording and write the journal YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self, recorded_at: DateTime<Utc>) -> Result<PathBuf, std::io::Error> {
        let journal = Journal {
            command: self.command,
            recorded_at,
            dry_run: self.dry_run,
            entries: self.entries,
        };
        let yaml = serde_yaml::to_string(&journal).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
