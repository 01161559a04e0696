//! Local cache port used by error remediation.

use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Removes the destination client's local cache.
#[cfg_attr(test, mockall::automock)]
pub trait CacheCleaner: Send + Sync {
    /// Deletes the cache. A cache that does not exist counts as removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheCleanupError`] when the cache exists but cannot be
    /// deleted.
    fn remove_cache(&self) -> Result<(), CacheCleanupError>;
}

/// Errors returned while deleting the local cache.
#[derive(Debug, Clone, Error)]
pub enum CacheCleanupError {
    /// No home directory could be determined for the current user.
    #[error("cannot locate the home directory holding the Todoist cache")]
    NoHomeDirectory,

    /// Filesystem failure while removing the cache.
    #[error("failed to remove cache directory {path}: {source}")]
    Io {
        /// Cache directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },
}
