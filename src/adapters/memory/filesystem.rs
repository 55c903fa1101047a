//! In-memory directory tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::clock::SteppingClock;
use crate::ports::clock::Clock;
use crate::ports::filesystem::{DirEntry, EntryTimes, FileSystem};
use crate::ports::PortError;

#[derive(Debug, Clone)]
enum Node {
    Dir { times: EntryTimes },
    File { contents: String, times: EntryTimes },
}

impl Node {
    fn times(&self) -> EntryTimes {
        match self {
            Self::Dir { times } | Self::File { times, .. } => *times,
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self, Self::Dir { .. })
    }
}

/// Directory tree held entirely in memory.
///
/// Clones share the same tree, so a test can hand one clone to the engine
/// and inspect the result through another. Renames refuse to overwrite an
/// existing path, matching what the engine expects from a real disk.
#[derive(Clone)]
pub struct MemFileSystem {
    nodes: Arc<Mutex<BTreeMap<PathBuf, Node>>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemFileSystem {
    /// Creates an empty tree stamped by a [`SteppingClock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SteppingClock::default()))
    }

    /// Creates an empty tree stamped by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { nodes: Arc::new(Mutex::new(BTreeMap::new())), clock }
    }

    /// Copies the trees rooted at `roots` out of `source`, timestamps included.
    ///
    /// Roots that do not exist in `source` are skipped. A root may be a
    /// directory or a single file. Entries created in the copy afterwards
    /// are stamped by `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry under an existing root cannot be read.
    pub fn snapshot(
        source: &dyn FileSystem,
        roots: &[&Path],
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PortError> {
        let snapshot = Self::with_clock(clock);
        for root in roots {
            if !source.exists(root) {
                continue;
            }
            if let Some(parent) = root.parent() {
                snapshot.create_dir_all(parent)?;
            }
            snapshot.copy_from(source, root)?;
        }
        Ok(snapshot)
    }

    fn copy_from(&self, source: &dyn FileSystem, path: &Path) -> Result<(), PortError> {
        let times = source.times(path)?;
        if let Ok(entries) = source.list_dir(path) {
            self.lock().insert(path.to_path_buf(), Node::Dir { times });
            for entry in entries {
                self.copy_from(source, &path.join(&entry.name))?;
            }
        } else {
            // Binary files keep their place in the tree but not their bytes.
            let contents = source.read_to_string(path).unwrap_or_default();
            self.lock().insert(path.to_path_buf(), Node::File { contents, times });
        }
        Ok(())
    }

    /// Overrides the timestamps of an existing entry.
    ///
    /// # Panics
    ///
    /// Panics if the path does not exist.
    pub fn set_times(&self, path: &Path, created: DateTime<Utc>, modified: DateTime<Utc>) {
        let mut nodes = self.lock();
        let node = nodes.get_mut(path).expect("set_times on missing path");
        let new_times = EntryTimes { created, modified };
        match node {
            Node::Dir { times } | Node::File { times, .. } => *times = new_times,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().expect("memory filesystem lock poisoned")
    }

    fn stamp(&self) -> EntryTimes {
        let now = self.clock.now();
        EntryTimes { created: now, modified: now }
    }

    fn insert_dirs(&self, nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) -> Result<(), PortError> {
        let mut missing: Vec<&Path> = Vec::new();
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            match nodes.get(ancestor) {
                Some(node) if node.is_dir() => break,
                Some(_) => return Err(format!("not a directory: {}", ancestor.display()).into()),
                None => missing.push(ancestor),
            }
        }
        for dir in missing.into_iter().rev() {
            nodes.insert(dir.to_path_buf(), Node::Dir { times: self.stamp() });
        }
        Ok(())
    }
}

impl FileSystem for MemFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        match self.lock().get(path) {
            Some(Node::File { contents, .. }) => Ok(contents.clone()),
            Some(Node::Dir { .. }) => Err(format!("is a directory: {}", path.display()).into()),
            None => Err(format!("file not found: {}", path.display()).into()),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let mut nodes = self.lock();
        if let Some(parent) = path.parent() {
            self.insert_dirs(&mut nodes, parent)?;
        }
        let times = match nodes.get(path) {
            Some(Node::Dir { .. }) => {
                return Err(format!("is a directory: {}", path.display()).into());
            }
            Some(Node::File { times, .. }) => EntryTimes { modified: self.clock.now(), ..*times },
            None => self.stamp(),
        };
        nodes.insert(path.to_path_buf(), Node::File { contents: contents.to_string(), times });
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PortError> {
        let nodes = self.lock();
        match nodes.get(path) {
            Some(node) if node.is_dir() => {}
            Some(_) => return Err(format!("not a directory: {}", path.display()).into()),
            None => return Err(format!("directory not found: {}", path.display()).into()),
        }
        let mut entries: Vec<DirEntry> = nodes
            .iter()
            .filter(|(k, _)| k.parent() == Some(path))
            .filter_map(|(k, node)| {
                k.file_name().map(|n| DirEntry {
                    name: n.to_string_lossy().into_owned(),
                    is_dir: node.is_dir(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn times(&self, path: &Path) -> Result<EntryTimes, PortError> {
        self.lock()
            .get(path)
            .map(Node::times)
            .ok_or_else(|| format!("path not found: {}", path.display()).into())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), PortError> {
        let mut nodes = self.lock();
        if !nodes.contains_key(from) {
            return Err(format!("path not found: {}", from.display()).into());
        }
        if nodes.contains_key(to) {
            return Err(format!("destination exists: {}", to.display()).into());
        }
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !nodes.get(parent).is_some_and(Node::is_dir) {
                return Err(format!("directory not found: {}", parent.display()).into());
            }
        }

        let moved: Vec<PathBuf> = nodes.keys().filter(|k| k.starts_with(from)).cloned().collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let rest = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new = if rest.as_os_str().is_empty() { to.to_path_buf() } else { to.join(rest) };
                nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let mut nodes = self.lock();
        self.insert_dirs(&mut nodes, path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), PortError> {
        let mut nodes = self.lock();
        if !nodes.get(path).is_some_and(Node::is_dir) {
            return Err(format!("directory not found: {}", path.display()).into());
        }
        nodes.retain(|k, _| !k.starts_with(path));
        Ok(())
    }
}
