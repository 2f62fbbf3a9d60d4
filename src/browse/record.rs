//! File records returned to the caller

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::filesystem::FileMetadata;

/// Permission bits kept in `unix_mode` (owner/group/other rwx)
pub const PERMISSION_BITS: u32 = 0o777;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    File,
    Directory,
}

/// Externally visible record for one entry in a page
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub file_type: FileType,
    pub created_at: i64,
    pub modified_at: i64,
    pub accessed_at: i64,
    pub size_in_bytes: u64,
    pub size_including_children_in_bytes: u64,
    pub unix_owner: u32,
    pub unix_group: u32,
    pub unix_mode: u32,
}

impl FileRecord {
    /// Map a stat result onto a record.
    ///
    /// There is no creation time on these filesystems, so `created_at`
    /// repeats the modification time. Sizes are not aggregated over
    /// children.
    pub fn from_metadata(path: &Path, meta: &FileMetadata) -> Self {
        let modified_at = unix_millis(meta.modified);
        Self {
            id: path.to_string_lossy().into_owned(),
            file_type: if meta.is_dir {
                FileType::Directory
            } else {
                FileType::File
            },
            created_at: modified_at,
            modified_at,
            accessed_at: unix_millis(meta.accessed),
            size_in_bytes: meta.size,
            size_including_children_in_bytes: meta.size,
            unix_owner: meta.uid,
            unix_group: meta.gid,
            unix_mode: meta.mode & PERMISSION_BITS,
        }
    }
}

/// Missing timestamps, and ones outside the representable range, map to 0
fn unix_millis(time: Option<SystemTime>) -> i64 {
    let Some(time) = time else {
        return 0;
    };
    let millis = match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).ok(),
        Err(before) => i64::try_from(before.duration().as_millis())
            .ok()
            .map(|m| -m),
    };
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or(0, |t| t.timestamp_millis())
}
