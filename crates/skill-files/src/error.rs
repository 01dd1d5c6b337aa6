//! Filesystem errors.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised by [`FileSystem`](crate::FileSystem) implementations.
///
/// # Examples
///
/// ```
/// use skill_deploy_files::FilesError;
///
/// let error = FilesError::FileNotFound {
///     path: "skills/pdf/SKILL.md".to_string(),
/// };
/// assert!(error.is_not_found());
/// ```
#[derive(Error, Debug)]
pub enum FilesError {
    /// Nothing exists at the path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The missing path
        path: String,
    },

    /// Path exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The offending path
        path: String,
    },

    /// Path exists but is a directory where a file was expected
    #[error("Not a file: {path}")]
    NotAFile {
        /// The offending path
        path: String,
    },

    /// Path is empty or uses an unsupported prefix
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// Path contains a parent directory reference
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The offending path
        path: String,
    },

    /// File content is not UTF-8
    #[error("File is not valid UTF-8: {path}")]
    InvalidUtf8 {
        /// The offending path
        path: String,
    },

    /// Underlying I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl FilesError {
    /// Wraps an I/O error, mapping `NotFound` to [`FilesError::FileNotFound`].
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Self::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }

    /// Returns `true` if the path does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` if a directory was expected.
    #[must_use]
    pub const fn is_not_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` for path validation failures.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. }
        )
    }
}

/// Result type for filesystem operations.
pub type Result<T> = std::result::Result<T, FilesError>;
