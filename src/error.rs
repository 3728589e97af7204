use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the obsidian-zola conversion.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Directory traversal failed below the content root.
    #[error("Failed to walk '{path}': {message}")]
    Walk {
        /// Entry that could not be visited
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Invalid UTF-8 encountered in file.
    #[error("Invalid UTF-8 encoding in file '{path}'. Notes must be UTF-8 text.")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },
}

impl Error {
    /// Creates an IO error with path context.
    ///
    /// Reads that fail on malformed UTF-8 are reported as
    /// [`Error::InvalidUtf8`] instead.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            return Self::invalid_utf8(path);
        }
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8 { path: path.into() }
    }

    /// Creates a traversal error from a `walkdir` failure under `root`.
    #[must_use]
    pub fn walk(root: impl Into<PathBuf>, source: &walkdir::Error) -> Self {
        let path = source
            .path()
            .map_or_else(|| root.into(), std::path::Path::to_path_buf);
        Self::Walk {
            path,
            message: source.to_string(),
        }
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}
