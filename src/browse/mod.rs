//! Cached, paginated directory browsing
//!
//! - `engine`: request handling, paging and continuation tokens
//! - `cache`: bounded, expiring store of sorted listings
//! - `sort`: entry orderings
//! - `record`: mapping of stat results to returned records
//! - `path_map`: hook for resolving drive-relative paths

pub mod cache;
pub mod engine;
pub mod error;
pub mod path_map;
pub mod record;
pub mod request;
pub mod sort;

pub use cache::{CachedListing, ListingCache};
pub use engine::BrowseEngine;
pub use error::BrowseError;
pub use path_map::{IdentityPathMapper, PathMapper};
pub use record::{FileRecord, FileType};
pub use request::{BrowseRequest, BrowseResult, Drive};
pub use sort::{SortDirection, SortKey};
