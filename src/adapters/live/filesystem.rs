//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::ports::filesystem::{DirEntry, EntryTimes, FileSystem};
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(DirEntry { name: name.to_string(), is_dir: entry.file_type()?.is_dir() });
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn times(&self, path: &Path) -> Result<EntryTimes, PortError> {
        let meta = std::fs::metadata(path)?;
        let modified: DateTime<Utc> = meta.modified()?.into();
        let created = meta.created().map_or(modified, DateTime::<Utc>::from);
        Ok(EntryTimes { created, modified })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError> {
        // std::fs::rename silently replaces files and empty directories.
        if to.exists() {
            return Err(format!("destination exists: {}", to.display()).into());
        }
        Ok(std::fs::rename(from, to)?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::remove_dir_all(path)?)
    }
}
