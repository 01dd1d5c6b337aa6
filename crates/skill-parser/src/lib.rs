//! `SKILL.md` descriptor parsing.
//!
//! A skill descriptor is a YAML header between two `---` delimiters
//! followed by a Markdown body. [`parse`] turns the raw text into a
//! [`SkillDescriptor`] or a [`ParseError`] naming what is wrong; it never
//! touches the filesystem.
//!
//! Two further passes work on an already parsed descriptor:
//! - [`validate`] reports soft problems (empty body, no headings)
//! - [`extract_commands`] pulls `Command:`/`Usage:` style lines out of the body
//!
//! # Examples
//!
//! ```
//! use skill_deploy_parser::{parse, validate};
//!
//! let text = "---\nname: pdf\ndescription: Work with PDF files\n---\n# PDF\nRead and merge PDFs.\n";
//! let skill = parse(text, "skills/pdf/SKILL.md").unwrap();
//!
//! assert_eq!(skill.name, "pdf");
//! assert_eq!(skill.metadata.description(), Some("Work with PDF files"));
//! assert_eq!(skill.parsed_content.sections[0].title, "PDF");
//! assert!(validate(&skill).is_clean());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod commands;
mod content;
mod error;
mod header;
mod types;
mod validate;

pub use commands::{extract_commands, extract_commands_from};
pub use content::extract_content;
pub use error::{ParseError, Result};
pub use header::{DELIMITER, decode_metadata, split_header};
pub use types::{
    DEFAULT_VERSION, OPTIONAL_FIELDS, ParsedContent, REQUIRED_FIELDS, Section, SkillDescriptor,
    SkillMetadata, ValidationReport,
};
pub use validate::validate;

use serde_json::Value;
use tracing::debug;

/// Parses descriptor text into a [`SkillDescriptor`].
///
/// `source` labels the text in diagnostics; it is usually the file path.
///
/// # Errors
///
/// - [`ParseError::MissingHeader`] if the text does not start with `---`
/// - [`ParseError::MalformedHeader`] if the header is never closed
/// - [`ParseError::MetadataSyntax`] if the header is not a YAML mapping
/// - [`ParseError::MissingRequiredFields`] listing every absent required key
pub fn parse(text: &str, source: &str) -> Result<SkillDescriptor> {
    let (header, body) = split_header(text, source)?;
    let metadata = decode_metadata(header, source)?;

    let missing = metadata.missing_required();
    if !missing.is_empty() {
        return Err(ParseError::MissingRequiredFields {
            origin: source.to_string(),
            fields: missing,
        });
    }

    let name = match metadata.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    debug!("Parsed skill descriptor '{}' from {}", name, source);

    Ok(SkillDescriptor {
        name,
        metadata,
        content: body.to_string(),
        parsed_content: extract_content(body),
        source: source.to_string(),
    })
}
