use serde::{Deserialize, Serialize};

use super::record::FileRecord;
use super::sort::{SortDirection, SortKey};

/// Drive the browsed path belongs to
///
/// Only path mappers look at it; the engine passes it through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// One page request for a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    /// Drive-relative path, resolved through the engine's `PathMapper`
    pub path: String,
    #[serde(default)]
    pub drive: Drive,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Continuation token; empty for the first page
    #[serde(default)]
    pub next: String,
    pub items_per_page: usize,
}

impl BrowseRequest {
    /// First-page request sorted by path, ascending
    pub fn new(path: impl Into<String>, items_per_page: usize) -> Self {
        Self {
            path: path.into(),
            drive: Drive::default(),
            sort_by: SortKey::Path,
            sort_direction: SortDirection::Ascending,
            next: String::new(),
            items_per_page,
        }
    }

    pub fn with_sort(mut self, sort_by: SortKey, sort_direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = sort_direction;
        self
    }

    pub fn with_drive(mut self, drive: Drive) -> Self {
        self.drive = drive;
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = next.into();
        self
    }

    /// Same request, continuing from the token of a previous result
    pub fn continue_from(&self, result: &BrowseResult) -> Self {
        self.clone().with_next(result.next.clone())
    }

    pub fn is_first_page(&self) -> bool {
        self.next.is_empty()
    }
}

/// One page of results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    pub items: Vec<FileRecord>,
    /// Continuation token; empty when there are no further pages
    pub next: String,
}

impl BrowseResult {
    /// Empty page with no continuation
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_last_page(&self) -> bool {
        self.next.is_empty()
    }
}
