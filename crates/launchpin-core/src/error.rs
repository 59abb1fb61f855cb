//! Error types for launchpin.
//!
//! Resolution failures are raised immediately. Only `FolderCreation` is scoped
//! to a single destination; callers may keep going with the others.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shortcut resolution and creation.
#[derive(Debug, Error)]
pub enum LaunchpinError {
    #[error("Could not determine a home directory for the current user")]
    HomeNotFound,

    #[error("Could not resolve special folder {folder}: {message}")]
    SpecialFolder { folder: String, message: String },

    #[error("Failed to create destination folder {path:?}: {source}")]
    FolderCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write shortcut {path:?}: {message}")]
    Write {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("{feature} is not supported on {platform}")]
    Unsupported { feature: String, platform: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for launchpin operations.
pub type Result<T> = std::result::Result<T, LaunchpinError>;

impl From<std::io::Error> for LaunchpinError {
    fn from(err: std::io::Error) -> Self {
        LaunchpinError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for LaunchpinError {
    fn from(err: serde_json::Error) -> Self {
        LaunchpinError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl LaunchpinError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        LaunchpinError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a writer error from an IO failure on `path`.
    pub fn write_failed(
        err: std::io::Error,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        LaunchpinError::Write {
            path: path.into(),
            message: message.into(),
            source: Some(err),
        }
    }
}
