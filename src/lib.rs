// Directory browsing library - exposes all core modules for testing

pub mod browse;
pub mod config;
pub mod model;
pub mod services;

pub use browse::{BrowseEngine, BrowseRequest, BrowseResult, SortDirection, SortKey};
pub use config::BrowseConfig;
