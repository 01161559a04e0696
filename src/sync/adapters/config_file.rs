//! TOML-backed loading of persisted preferences.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use thiserror::Error;
use tracing::debug;

use crate::sync::domain::Configuration;

/// Errors returned while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Configuration file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Configuration`].
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parses preferences from TOML text.
///
/// Missing keys take their defaults; unrecognised enum spellings are logged
/// and degraded rather than rejected.
///
/// # Errors
///
/// Returns [`ConfigFileError::Parse`] when the text is not valid TOML or a
/// value has the wrong type.
pub fn parse_configuration(text: &str) -> Result<Configuration, ConfigFileError> {
    Ok(toml::from_str(text)?)
}

/// Loads preferences from a TOML file, using defaults when it does not exist.
///
/// # Errors
///
/// Returns [`ConfigFileError`] when the file cannot be read or parsed.
pub fn load_configuration(path: &Utf8Path) -> Result<Configuration, ConfigFileError> {
    let io_error = |source| ConfigFileError::Io {
        path: path.to_owned(),
        source,
    };
    let Some(file_name) = path.file_name() else {
        return Err(io_error(std::io::Error::other(
            "configuration path must include a file name",
        )));
    };
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));

    let contents = match Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name))
    {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(%path, "no configuration file, using defaults");
            return Ok(Configuration::default());
        }
        Err(err) => return Err(io_error(err)),
    };
    parse_configuration(&contents)
}
