use std::io;
use std::path::PathBuf;

/// Failures inside a browse pass
///
/// None of these reach the caller of `BrowseEngine::browse`: an unreadable
/// directory or a bad token turns into an empty final page, and an entry
/// whose stat failed is left out of the page.
#[derive(Debug)]
pub enum BrowseError {
    DirectoryUnreadable { path: PathBuf, source: io::Error },
    EntryStatFailed { path: PathBuf },
    InvalidContinuationToken(String),
}

impl std::fmt::Display for BrowseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowseError::DirectoryUnreadable { path, source } => {
                write!(f, "Directory {} unreadable: {source}", path.display())
            }
            BrowseError::EntryStatFailed { path } => {
                write!(f, "No metadata for {}", path.display())
            }
            BrowseError::InvalidContinuationToken(token) => {
                write!(f, "Invalid continuation token {token:?}")
            }
        }
    }
}

impl std::error::Error for BrowseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowseError::DirectoryUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}
