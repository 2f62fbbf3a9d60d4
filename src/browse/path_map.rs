use std::path::PathBuf;

use super::request::Drive;

/// Resolves a drive-relative request path to a local directory
///
/// The resolved path is also the listing cache key, so a mapper must
/// return the same path for the same input.
pub trait PathMapper: Send + Sync {
    fn map_path(&self, path: &str, drive: &Drive) -> PathBuf;
}

/// Uses the request path as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPathMapper;

impl PathMapper for IdentityPathMapper {
    fn map_path(&self, path: &str, _drive: &Drive) -> PathBuf {
        PathBuf::from(path)
    }
}

impl<F> PathMapper for F
where
    F: Fn(&str, &Drive) -> PathBuf + Send + Sync,
{
    fn map_path(&self, path: &str, drive: &Drive) -> PathBuf {
        self(path, drive)
    }
}
