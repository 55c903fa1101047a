//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use super::record_result;
use crate::journal::JournalRecorder;
use crate::ports::filesystem::{DirEntry, EntryTimes, FileSystem};
use crate::ports::PortError;

/// Journals mutating filesystem calls while delegating to an inner implementation.
///
/// Reads pass through unrecorded.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<JournalRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<JournalRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

fn show(path: &Path) -> String {
    path.display().to_string()
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.inner.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        record_result(&self.recorder, "write", show(path), None, &result);
        result
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
        let result = self.inner.rename(from, to);
        record_result(&self.recorder, "rename", show(from), Some(show(to)), &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.create_dir_all(path);
        record_result(&self.recorder, "create_dir", show(path), None, &result);
        result
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.remove_dir_all(path);
        record_result(&self.recorder, "remove_dir", show(path), None, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemFileSystem;

    #[test]
    fn records_mutations_but_not_reads() {
        let recorder = Arc::new(Mutex::new(JournalRecorder::new("/unused", "test", true)));
        let mem = MemFileSystem::new();
        let fs = RecordingFileSystem::new(Box::new(mem), Arc::clone(&recorder));

        fs.create_dir_all(Path::new("/ex/001-a")).unwrap();
        let _ = fs.list_dir(Path::new("/ex"));
        fs.rename(Path::new("/ex/001-a"), Path::new("/ex/002-a")).unwrap();
        assert!(fs.rename(Path::new("/ex/001-a"), Path::new("/ex/003-a")).is_err());

        let guard = recorder.lock().unwrap();
        let ops: Vec<&str> = guard.entries().iter().map(|e| e.op.as_str()).collect();
        assert_eq!(ops, vec!["create_dir", "rename", "rename"]);
        assert_eq!(guard.entries()[1].to.as_deref(), Some("/ex/002-a"));
        assert!(guard.entries()[2].error.is_some());
    }
}
