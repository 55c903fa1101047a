//! Layered configuration.
//!
//! Precedence, lowest first: built-in defaults, `exercise-manager.yaml` in
//! the working directory, `.env` and process environment, CLI flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "exercise-manager.yaml";

/// Environment variable overriding the exercises directory.
pub const ENV_EXERCISES_DIR: &str = "EXERCISES_DIR";
/// Environment variable overriding the roadmap path.
pub const ENV_ROADMAP: &str = "ROADMAP_PATH";
/// Environment variable overriding the progress file path.
pub const ENV_PROGRESS_FILE: &str = "PROGRESS_FILE";
/// Environment variable enabling the mutation journal.
pub const ENV_JOURNAL: &str = "EXERCISES_JOURNAL";

/// Values read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding the numbered exercise folders.
    pub exercises_dir: Option<PathBuf>,
    /// Roadmap document kept in sync with the catalog.
    pub roadmap: Option<PathBuf>,
    /// JSON file with learner progress.
    pub progress_file: Option<PathBuf>,
    /// Where to write the mutation journal.
    pub journal: Option<PathBuf>,
}

impl FileConfig {
    /// Reads a config file, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Option<Self>, String> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Directory holding the numbered exercise folders.
    pub exercises_dir: PathBuf,
    /// Roadmap document kept in sync with the catalog.
    pub roadmap: PathBuf,
    /// JSON file with learner progress.
    pub progress_file: PathBuf,
    /// Where to write the mutation journal, if anywhere.
    pub journal: Option<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            exercises_dir: PathBuf::from("exercises"),
            roadmap: PathBuf::from("Roadmap.md"),
            progress_file: PathBuf::from(".progress.json"),
            journal: None,
        }
    }
}

impl ManagerConfig {
    /// Loads `.env`, the config file and the environment, then applies `root_override`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid.
    pub fn load(root_override: Option<&Path>) -> Result<Self, String> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        let file = FileConfig::read(Path::new(CONFIG_FILE))?;
        Ok(Self::layered(file, |key| std::env::var(key).ok(), root_override))
    }

    /// Applies each configuration layer over the defaults.
    #[must_use]
    pub fn layered<F>(file: Option<FileConfig>, env: F, root_override: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(dir) = file.exercises_dir {
                config.exercises_dir = dir;
            }
            if let Some(roadmap) = file.roadmap {
                config.roadmap = roadmap;
            }
            if let Some(progress) = file.progress_file {
                config.progress_file = progress;
            }
            config.journal = file.journal.or(config.journal);
        }

        let env_path = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        if let Some(dir) = env_path(ENV_EXERCISES_DIR) {
            config.exercises_dir = dir;
        }
        if let Some(roadmap) = env_path(ENV_ROADMAP) {
            config.roadmap = roadmap;
        }
        if let Some(progress) = env_path(ENV_PROGRESS_FILE) {
            config.progress_file = progress;
        }
        if let Some(journal) = env_path(ENV_JOURNAL) {
            config.journal = Some(journal);
        }

        if let Some(root) = root_override {
            config.exercises_dir = root.to_path_buf();
        }
        config
    }
}
