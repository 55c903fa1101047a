//! Progress store backed by a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseRecord;
use crate::error::{ManagerError, Result};
use crate::ports::filesystem::FileSystem;
use crate::ports::progress::ProgressTracker;

/// One learner's record for a single exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    /// Number of test runs recorded.
    #[serde(default)]
    pub attempts: u32,
    /// Whether the exercise passed.
    #[serde(default)]
    pub completed: bool,
    /// When the exercise was last attempted.
    #[serde(default)]
    pub last_attempt: Option<DateTime<Utc>>,
}

impl ProgressEntry {
    fn has_progress(&self) -> bool {
        self.attempts > 0 || self.completed || self.last_attempt.is_some()
    }
}

/// Shape of the progress file: entries keyed by folder name or slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProgressFile {
    /// Recorded progress per exercise.
    #[serde(default)]
    pub exercises: BTreeMap<String, ProgressEntry>,
}

/// Progress tracker loaded once from a JSON file.
#[derive(Debug, Default)]
pub struct JsonProgressStore {
    file: ProgressFile,
}

impl JsonProgressStore {
    /// Loads the progress file at `path`. A missing file means no progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            tracing::debug!(path = %path.display(), "no progress file");
            return Ok(Self::default());
        }
        let contents = fs.read_to_string(path).map_err(|e| ManagerError::Progress {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file = serde_json::from_str(&contents).map_err(|e| ManagerError::Progress {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self { file })
    }
}

impl ProgressTracker for JsonProgressStore {
    fn has_progress(&self, exercise: &ExerciseRecord) -> bool {
        self.file
            .exercises
            .get(&exercise.full_name)
            .or_else(|| self.file.exercises.get(&exercise.slug))
            .is_some_and(ProgressEntry::has_progress)
    }
}
