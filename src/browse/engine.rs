//! Paged directory browsing over cached listings
//!
//! A first-page request (empty continuation token) always lists the
//! directory from scratch and replaces whatever the cache held for it, so
//! a refresh never shows stale results. Follow-up pages reuse the cached
//! listing while it is live, which avoids repeating a multi-second
//! `readdir` for every page of a huge directory.
//!
//! Each request is one pass:
//! 1. Map the request path to the local directory (the cache key)
//! 2. Reuse the cached listing, or build a fresh one
//! 3. Parse the token into a start offset
//! 4. Walk from the offset, statting pending entries and skipping entries
//!    without metadata, until the page is full
//! 5. Hand back the cursor as the next token, or an empty token at the end
//!
//! Nothing here surfaces an error. An unreadable directory or a bad token
//! yields an empty final page.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::cache::{CachedListing, ListingCache};
use super::error::BrowseError;
use super::path_map::{IdentityPathMapper, PathMapper};
use super::record::FileRecord;
use super::request::{BrowseRequest, BrowseResult};
use super::sort::{sort_entries, SortDirection, SortKey};
use crate::config::BrowseConfig;
use crate::model::entry::DirectoryEntry;
use crate::model::filesystem::{FileMetadata, FileSystem};

pub struct BrowseEngine<M: PathMapper = IdentityPathMapper> {
    fs: Arc<dyn FileSystem>,
    cache: ListingCache,
    mapper: M,
    eager_stat_limit: usize,
}

impl BrowseEngine {
    /// Engine that browses request paths as local paths
    pub fn new(fs: Arc<dyn FileSystem>, config: &BrowseConfig) -> Self {
        Self::with_path_mapper(fs, config, IdentityPathMapper)
    }
}

impl<M: PathMapper> BrowseEngine<M> {
    pub fn with_path_mapper(fs: Arc<dyn FileSystem>, config: &BrowseConfig, mapper: M) -> Self {
        Self::from_parts(
            fs,
            ListingCache::from_config(config),
            mapper,
            config.eager_stat_limit,
        )
    }

    pub fn from_parts(
        fs: Arc<dyn FileSystem>,
        cache: ListingCache,
        mapper: M,
        eager_stat_limit: usize,
    ) -> Self {
        Self {
            fs,
            cache,
            mapper,
            eager_stat_limit,
        }
    }

    pub fn cache(&self) -> &ListingCache {
        &self.cache
    }

    /// Produce one page for the request
    pub fn browse(&self, request: &BrowseRequest) -> BrowseResult {
        let dir = self.mapper.map_path(&request.path, &request.drive);

        let listing = match self.acquire_listing(&dir, request) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("{}", e);
                return BrowseResult::empty();
            }
        };

        if listing.is_empty() {
            return BrowseResult::empty();
        }

        let offset = match parse_token(&request.next, listing.len()) {
            Ok(offset) => offset,
            Err(e) => {
                tracing::debug!("{} for {:?} ({} entries)", e, dir, listing.len());
                return BrowseResult::empty();
            }
        };

        self.emit_page(&listing, offset, request.items_per_page)
    }

    fn acquire_listing(
        &self,
        dir: &Path,
        request: &BrowseRequest,
    ) -> Result<Arc<CachedListing>, BrowseError> {
        if !request.is_first_page() {
            if let Some(listing) = self.cache.get(dir) {
                tracing::debug!("reusing cached listing for {:?}", dir);
                return Ok(listing);
            }
            tracing::debug!("no live listing for {:?}, listing again", dir);
        }

        let listing = self.build_listing(dir, request.sort_by, request.sort_direction)?;
        Ok(self.cache.put(dir.to_path_buf(), listing))
    }

    /// Enumerate, optionally stat, and sort a directory
    fn build_listing(
        &self,
        dir: &Path,
        requested_key: SortKey,
        direction: SortDirection,
    ) -> Result<CachedListing, BrowseError> {
        let started = Instant::now();

        let names = self
            .fs
            .read_dir_names(dir)
            .map_err(|source| BrowseError::DirectoryUnreadable {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut entries: Vec<DirectoryEntry> = names
            .into_iter()
            .map(|name| DirectoryEntry::new(dir.join(name)))
            .collect();

        // Path order needs no metadata, so huge directories defer every
        // stat to the entries that actually get emitted
        let sort_key = if entries.len() > self.eager_stat_limit {
            tracing::debug!(
                "{:?} has {} entries, sorting by path without stat",
                dir,
                entries.len()
            );
            SortKey::Path
        } else {
            for entry in &entries {
                let _ = entry.load_metadata(self.fs.as_ref());
            }
            requested_key
        };

        sort_entries(&mut entries, sort_key, direction);

        tracing::debug!(
            "listed {} entries of {:?} by {} in {:?}",
            entries.len(),
            dir,
            sort_key,
            started.elapsed()
        );

        Ok(CachedListing::new(entries, sort_key, direction))
    }

    fn emit_page(&self, listing: &CachedListing, offset: usize, page_size: usize) -> BrowseResult {
        let entries = listing.entries();
        let mut items = Vec::with_capacity(page_size.min(entries.len() - offset));

        let mut cursor = offset;
        while cursor < entries.len() && items.len() < page_size {
            let entry = &entries[cursor];
            cursor += 1;

            match self.entry_metadata(entry) {
                Ok(meta) => items.push(FileRecord::from_metadata(entry.path(), meta)),
                Err(e) => tracing::trace!("skipping: {}", e),
            }
        }

        let next = if cursor < entries.len() {
            cursor.to_string()
        } else {
            String::new()
        };

        BrowseResult { items, next }
    }

    /// Stat a pending entry; entries whose stat failed are left out of pages
    fn entry_metadata<'a>(
        &self,
        entry: &'a DirectoryEntry,
    ) -> Result<&'a FileMetadata, BrowseError> {
        entry
            .load_metadata(self.fs.as_ref())
            .ok_or_else(|| BrowseError::EntryStatFailed {
                path: entry.path().to_path_buf(),
            })
    }
}

/// Parse a continuation token into an offset within a listing of `len`
///
/// The empty token is offset 0. Anything that is not a non-negative
/// integer below `len` is rejected, including every token for an empty
/// listing.
pub fn parse_token(token: &str, len: usize) -> Result<usize, BrowseError> {
    let offset = if token.is_empty() {
        0
    } else {
        token
            .parse::<usize>()
            .map_err(|_| BrowseError::InvalidContinuationToken(token.to_string()))?
    };

    if offset >= len {
        return Err(BrowseError::InvalidContinuationToken(token.to_string()));
    }
    Ok(offset)
}
