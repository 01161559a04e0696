//! Filesystem adapter for the Todoist client cache.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::info;

use crate::sync::ports::{CacheCleaner, CacheCleanupError};

/// Directory name the Todoist client keeps its sync cache under.
pub const TODOIST_CACHE_DIRECTORY_NAME: &str = ".todoist-sync";

/// The on-disk cache directory of the Todoist client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoistCacheDirectory {
    path: Utf8PathBuf,
}

impl TodoistCacheDirectory {
    /// Targets an explicit cache directory.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Targets `~/.todoist-sync` for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`CacheCleanupError::NoHomeDirectory`] when the home directory
    /// is unknown or not valid UTF-8.
    pub fn in_home_directory() -> Result<Self, CacheCleanupError> {
        let home = dirs::home_dir().ok_or(CacheCleanupError::NoHomeDirectory)?;
        let utf8_home =
            Utf8PathBuf::from_path_buf(home).map_err(|_| CacheCleanupError::NoHomeDirectory)?;
        Ok(Self::new(utf8_home.join(TODOIST_CACHE_DIRECTORY_NAME)))
    }

    /// Returns the cache directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, err: std::io::Error) -> CacheCleanupError {
        CacheCleanupError::Io {
            path: self.path.clone(),
            source: Arc::new(err),
        }
    }
}

impl CacheCleaner for TodoistCacheDirectory {
    fn remove_cache(&self) -> Result<(), CacheCleanupError> {
        let Some(directory_name) = self.path.file_name() else {
            return Err(self.io_error(std::io::Error::other(
                "cache path must include a directory name",
            )));
        };
        let parent = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));

        let parent_dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(self.io_error(err)),
        };
        match parent_dir.remove_dir_all(directory_name) {
            Ok(()) => {
                info!(path = %self.path, "removed Todoist cache directory");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
