//! Error types for scanning and deployment.

use skill_deploy_files::FilesError;
use skill_deploy_parser::ParseError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while scanning, deploying, or indexing skills.
///
/// Per-skill failures ([`SkillNotFound`](Self::SkillNotFound),
/// [`Parse`](Self::Parse), [`InvalidSkillName`](Self::InvalidSkillName))
/// are reported in a [`DeployReport`](crate::DeployReport) and never stop
/// a batch.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// No `SKILL.md` exists for the requested skill.
    #[error("Skill not found: {skill_name}")]
    SkillNotFound {
        /// Name that was looked up
        skill_name: String,
    },

    /// The source repository root does not exist.
    ///
    /// This is the only condition that stops a deployment run outright.
    #[error("Skills directory does not exist: {path}")]
    SourceRootMissing {
        /// Configured skills directory
        path: String,
    },

    /// Skill name cannot be used as a directory name.
    ///
    /// # Examples
    ///
    /// ```
    /// use skill_deploy_store::validate_skill_name;
    ///
    /// assert!(validate_skill_name("pdf-tools").is_ok());
    /// assert!(validate_skill_name("../escape").is_err());
    /// assert!(validate_skill_name("").is_err());
    /// ```
    #[error("Invalid skill name: {skill_name:?} ({reason})")]
    InvalidSkillName {
        /// The rejected name
        skill_name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A `deployment.json` could not be decoded.
    #[error("Invalid deployment record {path}: {reason}")]
    InvalidRecord {
        /// Location of the record
        path: String,
        /// Decoder message
        reason: String,
    },

    /// The descriptor could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A filesystem operation failed.
    #[error(transparent)]
    Files(#[from] FilesError),

    /// A record or index could not be serialized.
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        /// Destination file
        path: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns `true` if the skill does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SkillNotFound { .. })
    }

    /// Returns `true` if the descriptor failed to parse.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns `true` if a batch run can continue past this error.
    ///
    /// Everything except a missing source root concerns a single skill.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SourceRootMissing { .. })
    }
}
