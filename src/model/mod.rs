//! Core data model for directory listings
//!
//! This module contains the filesystem seam and the cache-resident entry
//! types, with minimal external dependencies.

pub mod entry;
pub mod filesystem;
