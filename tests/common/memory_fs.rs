//! In-memory filesystem for browse tests
//!
//! Directories are name lists; a name without registered metadata fails to
//! stat. Every call is counted so tests can assert when stats happen.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pagedir::model::filesystem::{FileMetadata, FileSystem};

#[derive(Default)]
struct State {
    dirs: HashMap<PathBuf, Vec<OsString>>,
    metadata: HashMap<PathBuf, FileMetadata>,
}

#[derive(Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    read_dir_calls: AtomicUsize,
    stat_calls: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, dir: &str) {
        self.state
            .lock()
            .unwrap()
            .dirs
            .entry(PathBuf::from(dir))
            .or_default();
    }

    /// Add a child that stats successfully
    pub fn add_file(&self, dir: &str, name: &str, meta: FileMetadata) {
        let mut state = self.state.lock().unwrap();
        state
            .dirs
            .entry(PathBuf::from(dir))
            .or_default()
            .push(OsString::from(name));
        state.metadata.insert(Path::new(dir).join(name), meta);
    }

    /// Add a child whose stat always fails
    pub fn add_broken(&self, dir: &str, name: &str) {
        self.state
            .lock()
            .unwrap()
            .dirs
            .entry(PathBuf::from(dir))
            .or_default()
            .push(OsString::from(name));
    }

    pub fn remove(&self, dir: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(names) = state.dirs.get_mut(Path::new(dir)) {
            names.retain(|n| n != name);
        }
        state.metadata.remove(&Path::new(dir).join(name));
    }

    pub fn read_dir_calls(&self) -> usize {
        self.read_dir_calls.load(Ordering::SeqCst)
    }

    pub fn stat_calls(&self) -> usize {
        self.stat_calls.load(Ordering::SeqCst)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        self.read_dir_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .dirs
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        self.stat_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .metadata
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "stat failed"))
    }
}
