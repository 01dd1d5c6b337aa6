//! Error types shared across the skill deployment workspace.
//!
//! # Examples
//!
//! ```
//! use skill_deploy_core::{Error, Result};
//!
//! fn check_dir(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "skills_dir cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_dir("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for configuration and argument handling.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Configuration file could not be read or written.
    #[error("Configuration file error at {path}: {source}")]
    ConfigIo {
        /// Location of the configuration file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`DeployConfig`](crate::DeployConfig).
    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse {
        /// Location of the configuration file
        path: String,
        /// Decoder message
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a configuration error of any kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use skill_deploy_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad log level".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. } | Self::ConfigIo { .. } | Self::ConfigParse { .. }
        )
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias using the workspace [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::ConfigError {
            message: "resource_dirs cannot be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: resource_dirs cannot be empty"
        );
        assert!(err.is_config_error());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_config_io_has_source() {
        use std::error::Error as _;

        let err = Error::ConfigIo {
            path: "/etc/skill-deploy/config.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_invalid_argument() {
        let err = Error::InvalidArgument("unknown format".to_string());
        assert!(err.is_invalid_argument());
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("unknown format"));
    }
}
