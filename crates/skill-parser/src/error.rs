//! Descriptor parse failures.

use thiserror::Error;

/// Reasons a descriptor could not be produced.
///
/// Every variant carries the `origin` label passed to
/// [`parse`](crate::parse) so a batch caller can report which skill failed
/// and continue with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Text does not begin with the `---` delimiter.
    #[error("missing metadata header in {origin}")]
    MissingHeader {
        /// Source label of the rejected text
        origin: String,
    },

    /// Opening delimiter present but never closed.
    #[error("metadata header is not closed in {origin}")]
    MalformedHeader {
        /// Source label of the rejected text
        origin: String,
    },

    /// Header block is not a decodable key/value mapping.
    #[error("invalid metadata in {origin}: {detail}")]
    MetadataSyntax {
        /// Source label of the rejected text
        origin: String,
        /// Decoder message
        detail: String,
    },

    /// Header decoded but lacks required keys.
    #[error("missing required fields {} in {origin}", fields.join(", "))]
    MissingRequiredFields {
        /// Source label of the rejected text
        origin: String,
        /// Every absent required key, in declaration order
        fields: Vec<String>,
    },
}

impl ParseError {
    /// Returns the source label of the text that failed to parse.
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::MissingHeader { origin }
            | Self::MalformedHeader { origin }
            | Self::MetadataSyntax { origin, .. }
            | Self::MissingRequiredFields { origin, .. } => origin,
        }
    }

    /// Returns `true` if the header delimiter is absent or unclosed.
    #[must_use]
    pub const fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::MissingHeader { .. } | Self::MalformedHeader { .. }
        )
    }

    /// Returns `true` if the header could not be decoded.
    #[must_use]
    pub const fn is_metadata_syntax(&self) -> bool {
        matches!(self, Self::MetadataSyntax { .. })
    }

    /// Returns the missing required keys, empty for other failures.
    #[must_use]
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::MissingRequiredFields { fields, .. } => fields,
            _ => &[],
        }
    }
}

/// Result type for descriptor parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_display_lists_all() {
        let err = ParseError::MissingRequiredFields {
            origin: "skills/demo/SKILL.md".to_string(),
            fields: vec!["name".to_string(), "description".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields name, description in skills/demo/SKILL.md"
        );
        assert_eq!(err.missing_fields().len(), 2);
        assert_eq!(err.origin(), "skills/demo/SKILL.md");
    }

    #[test]
    fn test_classification() {
        let missing = ParseError::MissingHeader {
            origin: "a".to_string(),
        };
        let unclosed = ParseError::MalformedHeader {
            origin: "b".to_string(),
        };
        let syntax = ParseError::MetadataSyntax {
            origin: "c".to_string(),
            detail: "bad indent".to_string(),
        };

        assert!(missing.is_header_error());
        assert!(unclosed.is_header_error());
        assert!(!syntax.is_header_error());
        assert!(syntax.is_metadata_syntax());
        assert!(syntax.missing_fields().is_empty());
        assert!(syntax.to_string().contains("bad indent"));
    }
}
