//! Filesystem port for the exercise directory tree.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::PortError;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name (no path components).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Creation and modification timestamps of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTimes {
    /// When the entry was created (falls back to `modified` where unsupported).
    pub created: DateTime<Utc>,
    /// When the entry was last modified.
    pub modified: DateTime<Utc>,
}

/// Provides access to the directory tree that acts as the exercise store.
///
/// Abstracting the filesystem lets the engine run against an in-memory
/// tree in tests and dry runs without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entries in a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError>;

    /// Returns the timestamps of a file or directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist.
    fn times(&self, path: &Path) -> Result<EntryTimes, PortError>;

    /// Renames a file or directory. Fails if `to` already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is missing, `to` exists, or the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError>;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Removes a directory and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError>;
}
