//! Ordering of directory entries
//!
//! Every key is a total order: ties, and pairs of entries without
//! metadata, fall back to path order. Entries with metadata always come
//! before entries without, so failed stats collect at one end.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::entry::DirectoryEntry;
use crate::model::filesystem::FileMetadata;

/// Sort key for a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum SortKey {
    /// Lexicographic by absolute path; needs no metadata
    #[default]
    Path,
    /// By size in bytes
    Size,
    /// By modification time
    ModifiedAt,
}

impl SortKey {
    /// Parse a wire value. Unknown values fall back to `Path`.
    pub fn parse(value: &str) -> Self {
        match value {
            "SIZE" => SortKey::Size,
            "MODIFIED_AT" => SortKey::ModifiedAt,
            _ => SortKey::Path,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Path => "PATH",
            SortKey::Size => "SIZE",
            SortKey::ModifiedAt => "MODIFIED_AT",
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Compare two entries by the given key, ascending
pub fn compare(key: SortKey, a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    match key {
        SortKey::Path => compare_by_path(a, b),
        SortKey::Size => compare_by_metadata(a, b, |m| m.size),
        SortKey::ModifiedAt => compare_by_metadata(a, b, |m| m.modified),
    }
}

fn compare_by_path(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    a.path().as_os_str().cmp(b.path().as_os_str())
}

fn compare_by_metadata<T: Ord>(
    a: &DirectoryEntry,
    b: &DirectoryEntry,
    field: impl Fn(&FileMetadata) -> T,
) -> Ordering {
    match (a.metadata(), b.metadata()) {
        (Some(ma), Some(mb)) => field(ma)
            .cmp(&field(mb))
            .then_with(|| compare_by_path(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_by_path(a, b),
    }
}

/// Sort ascending by `key`, then reverse the whole sequence if descending
pub fn sort_entries(entries: &mut [DirectoryEntry], key: SortKey, direction: SortDirection) {
    entries.sort_by(|a, b| compare(key, a, b));
    if direction == SortDirection::Descending {
        entries.reverse();
    }
}
