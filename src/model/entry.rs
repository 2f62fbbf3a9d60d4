//! Cache-resident directory entries with lazily attached metadata

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::filesystem::{FileMetadata, FileSystem};

/// Outcome of the single stat attempt an entry gets per listing
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetadataState {
    Loaded(FileMetadata),
    Unavailable,
}

/// One child of a listed directory
///
/// The stat outcome lives in a set-once cell: an entry starts pending, and
/// the first stat attempt moves it to loaded or unavailable for good. Two
/// threads paging the same listing may both stat a pending entry; whichever
/// stores first wins and the other result is dropped.
#[derive(Debug)]
pub struct DirectoryEntry {
    path: PathBuf,
    state: OnceLock<MetadataState>,
}

impl DirectoryEntry {
    /// Create a pending entry (stat not yet attempted)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: OnceLock::new(),
        }
    }

    /// Create an entry with metadata already attached
    pub fn with_metadata(path: PathBuf, metadata: FileMetadata) -> Self {
        let entry = Self::new(path);
        let _ = entry.state.set(MetadataState::Loaded(metadata));
        entry
    }

    /// Absolute path of the entry
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> Option<&FileMetadata> {
        match self.state.get() {
            Some(MetadataState::Loaded(meta)) => Some(meta),
            _ => None,
        }
    }

    pub fn metadata_loaded(&self) -> bool {
        matches!(self.state.get(), Some(MetadataState::Loaded(_)))
    }

    /// True once a stat attempt has failed; never cleared
    pub fn metadata_unavailable(&self) -> bool {
        matches!(self.state.get(), Some(MetadataState::Unavailable))
    }

    /// True while no stat has been attempted
    pub fn is_pending(&self) -> bool {
        self.state.get().is_none()
    }

    /// Stat the entry if no attempt has been made yet
    ///
    /// Returns the attached metadata, or `None` if this or an earlier
    /// attempt failed. Failures are never retried.
    pub fn load_metadata(&self, fs: &dyn FileSystem) -> Option<&FileMetadata> {
        if self.is_pending() {
            let state = match fs.metadata(&self.path) {
                Ok(meta) => MetadataState::Loaded(meta),
                Err(e) => {
                    tracing::debug!("stat failed for {:?}: {}", self.path, e);
                    MetadataState::Unavailable
                }
            };
            // Losing the race to another thread keeps its result instead
            let _ = self.state.set(state);
        }
        self.metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stats succeed for paths ending in "ok", fail otherwise
    #[derive(Default)]
    struct CountingFs {
        stats: AtomicUsize,
    }

    impl FileSystem for CountingFs {
        fn read_dir_names(&self, _path: &Path) -> io::Result<Vec<OsString>> {
            Ok(Vec::new())
        }

        fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
            self.stats.fetch_add(1, Ordering::SeqCst);
            if path.ends_with("ok") {
                Ok(FileMetadata::new(7))
            } else {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
    }

    #[test]
    fn test_new_entry_is_pending() {
        let entry = DirectoryEntry::new(PathBuf::from("/d/a"));
        assert!(entry.is_pending());
        assert!(!entry.metadata_loaded());
        assert!(!entry.metadata_unavailable());
        assert!(entry.metadata().is_none());
    }

    #[test]
    fn test_load_metadata_success() {
        let fs = CountingFs::default();
        let entry = DirectoryEntry::new(PathBuf::from("/d/ok"));

        assert_eq!(entry.load_metadata(&fs).unwrap().size, 7);
        assert!(entry.metadata_loaded());
        assert!(!entry.metadata_unavailable());

        // Already loaded, no second stat
        let _ = entry.load_metadata(&fs);
        assert_eq!(fs.stats.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_stat_is_sticky() {
        let fs = CountingFs::default();
        let entry = DirectoryEntry::new(PathBuf::from("/d/broken"));

        assert!(entry.load_metadata(&fs).is_none());
        assert!(entry.metadata_unavailable());
        assert!(!entry.metadata_loaded());

        assert!(entry.load_metadata(&fs).is_none());
        assert_eq!(fs.stats.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_metadata_skips_stat() {
        let fs = CountingFs::default();
        let entry = DirectoryEntry::with_metadata(PathBuf::from("/d/x"), FileMetadata::new(3));

        assert!(entry.metadata_loaded());
        assert_eq!(entry.load_metadata(&fs).unwrap().size, 3);
        assert_eq!(fs.stats.load(Ordering::SeqCst), 0);
    }
}
