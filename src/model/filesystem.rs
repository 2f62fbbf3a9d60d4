//! Filesystem abstraction for the two syscalls a directory listing needs
//!
//! Browsing only ever enumerates the names in a directory and stats
//! individual paths. Both are hidden behind the `FileSystem` trait so the
//! browse engine can run against:
//! - `StdFileSystem`: Native filesystem using `std::fs`
//! - `NoopFileSystem`: Placeholder that fails every call
//! - Custom implementations for remote storage or tests
//!
//! The trait is synchronous. Async callers should use `spawn_blocking` or
//! similar patterns.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::time::SystemTime;

// ============================================================================
// Metadata Types
// ============================================================================

/// Stat result for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: Option<SystemTime>,
    /// Last access time
    pub accessed: Option<SystemTime>,
    /// Owner UID (0 on platforms without Unix ownership)
    pub uid: u32,
    /// Group GID (0 on platforms without Unix ownership)
    pub gid: u32,
    /// Raw mode bits, including file type and setuid/setgid/sticky bits
    pub mode: u32,
    /// Whether the path is a directory (after following symlinks)
    pub is_dir: bool,
}

impl FileMetadata {
    /// Create minimal metadata for a regular file with just size
    pub fn new(size: u64) -> Self {
        Self {
            size,
            modified: None,
            accessed: None,
            uid: 0,
            gid: 0,
            mode: 0o100644,
            is_dir: false,
        }
    }

    /// Builder: set modified time
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Builder: set accessed time
    pub fn with_accessed(mut self, accessed: SystemTime) -> Self {
        self.accessed = Some(accessed);
        self
    }

    /// Builder: set owner and group
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Builder: set raw mode bits
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: mark as directory
    pub fn with_dir(mut self, is_dir: bool) -> Self {
        self.is_dir = is_dir;
        self
    }
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// FileSystem Trait
// ============================================================================

/// The syscalls a directory listing is built from
///
/// Both calls can be slow on large or networked filesystems; the browse
/// engine decides when each is worth paying for.
pub trait FileSystem: Send + Sync {
    /// List the names of the entries in a directory (non-recursive, no stat)
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or read
    /// (permission denied, doesn't exist, not a directory, etc.)
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Stat a path, following symlinks
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;
}

// ============================================================================
// StdFileSystem Implementation
// ============================================================================

/// Standard filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Build FileMetadata from std::fs::Metadata
    fn build_metadata(meta: &std::fs::Metadata) -> FileMetadata {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            FileMetadata {
                size: meta.len(),
                modified: meta.modified().ok(),
                accessed: meta.accessed().ok(),
                uid: meta.uid(),
                gid: meta.gid(),
                mode: meta.mode(),
                is_dir: meta.is_dir(),
            }
        }
        #[cfg(not(unix))]
        {
            let mode = if meta.permissions().readonly() {
                0o444
            } else {
                0o644
            };
            FileMetadata {
                size: meta.len(),
                modified: meta.modified().ok(),
                accessed: meta.accessed().ok(),
                uid: 0,
                gid: 0,
                mode,
                is_dir: meta.is_dir(),
            }
        }
    }
}

impl FileSystem for StdFileSystem {
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name());
        }
        Ok(names)
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let meta = std::fs::metadata(path)?;
        Ok(Self::build_metadata(&meta))
    }
}

// ============================================================================
// NoopFileSystem Implementation
// ============================================================================

/// No-op filesystem that returns errors for all operations
///
/// Every directory browsed through it looks unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileSystem;

impl NoopFileSystem {
    fn unsupported<T>() -> io::Result<T> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Filesystem not available",
        ))
    }
}

impl FileSystem for NoopFileSystem {
    fn read_dir_names(&self, _path: &Path) -> io::Result<Vec<OsString>> {
        Self::unsupported()
    }

    fn metadata(&self, _path: &Path) -> io::Result<FileMetadata> {
        Self::unsupported()
    }
}

// ============================================================================
// Tests
// ============================================================================
