//! Header block splitting and decoding.
//!
//! A descriptor starts with `---`, then a YAML block, then another `---`:
//!
//! ```text
//! ---
//! name: pdf
//! description: Work with PDF files
//! ---
//! # PDF
//! ```
//!
//! The text is cut at the first two occurrences of the delimiter only, so
//! any later `---` (a Markdown rule, say) stays in the body.

use crate::error::{ParseError, Result};
use crate::types::SkillMetadata;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

/// Header block delimiter.
pub const DELIMITER: &str = "---";

/// Splits descriptor text into trimmed `(header, body)` blocks.
///
/// # Errors
///
/// Returns [`ParseError::MissingHeader`] if `text` does not start with the
/// delimiter and [`ParseError::MalformedHeader`] if no closing delimiter
/// follows it.
///
/// # Examples
///
/// ```
/// use skill_deploy_parser::split_header;
///
/// let (header, body) = split_header("---\nname: a\n---\nbody --- text\n", "inline").unwrap();
/// assert_eq!(header, "name: a");
/// assert_eq!(body, "body --- text");
/// ```
pub fn split_header<'a>(text: &'a str, origin: &str) -> Result<(&'a str, &'a str)> {
    let Some(rest) = text.strip_prefix(DELIMITER) else {
        return Err(ParseError::MissingHeader {
            origin: origin.to_string(),
        });
    };

    let (header, body) = rest
        .split_once(DELIMITER)
        .ok_or_else(|| ParseError::MalformedHeader {
            origin: origin.to_string(),
        })?;

    Ok((header.trim(), body.trim()))
}

/// Decodes a header block into a metadata mapping.
///
/// An empty or null document becomes an empty mapping. Scalar keys are
/// turned into strings; tagged values are unwrapped; floats that JSON
/// cannot hold become null.
///
/// # Errors
///
/// Returns [`ParseError::MetadataSyntax`] if the block is not valid YAML, is
/// a scalar or sequence rather than a mapping, or uses a sequence or
/// mapping as a key.
pub fn decode_metadata(header: &str, origin: &str) -> Result<SkillMetadata> {
    let syntax = |detail: String| ParseError::MetadataSyntax {
        origin: origin.to_string(),
        detail,
    };

    let document: Yaml = serde_yaml::from_str(header).map_err(|e| syntax(e.to_string()))?;

    match untag(document) {
        Yaml::Null => Ok(SkillMetadata::default()),
        Yaml::Mapping(mapping) => convert_mapping(mapping)
            .map(SkillMetadata::new)
            .map_err(syntax),
        other => Err(syntax(format!(
            "expected a key/value mapping, found {}",
            kind_name(&other)
        ))),
    }
}

fn untag(value: Yaml) -> Yaml {
    match value {
        Yaml::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn convert_mapping(mapping: serde_yaml::Mapping) -> std::result::Result<Map<String, Value>, String> {
    let mut map = Map::new();
    for (key, value) in mapping {
        let key = match untag(key) {
            Yaml::String(s) => s,
            Yaml::Bool(b) => b.to_string(),
            Yaml::Number(n) => n.to_string(),
            Yaml::Null => "null".to_string(),
            other => {
                return Err(format!(
                    "unsupported {} used as a mapping key",
                    kind_name(&other)
                ));
            }
        };
        map.insert(key, convert_value(value)?);
    }
    Ok(map)
}

fn convert_value(value: Yaml) -> std::result::Result<Value, String> {
    Ok(match untag(value) {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => convert_number(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(convert_value)
                .collect::<std::result::Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => Value::Object(convert_mapping(mapping)?),
        Yaml::Tagged(_) => Value::Null,
    })
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

const fn kind_name(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "boolean",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_requires_leading_delimiter() {
        let err = split_header("name: a\n---\nbody", "t").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingHeader {
                origin: "t".to_string()
            }
        );
    }

    #[test]
    fn test_split_leading_whitespace_is_not_a_header() {
        let err = split_header("\n---\nname: a\n---\n", "t").unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader { .. }));
    }

    #[test]
    fn test_split_unclosed_header() {
        let err = split_header("---\nname: a\ndescription: b\n", "t").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader { .. }));
    }

    #[test]
    fn test_split_keeps_later_delimiters_in_body() {
        let (header, body) = split_header("---\nname: a\n---\none\n---\ntwo\n", "t").unwrap();
        assert_eq!(header, "name: a");
        assert_eq!(body, "one\n---\ntwo");
    }

    #[test]
    fn test_split_empty_header() {
        let (header, body) = split_header("------\nbody", "t").unwrap();
        assert_eq!(header, "");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_decode_empty_and_null() {
        assert!(decode_metadata("", "t").unwrap().is_empty());
        assert!(decode_metadata("~", "t").unwrap().is_empty());
        assert!(decode_metadata("# only a comment", "t").unwrap().is_empty());
    }

    #[test]
    fn test_decode_nested_values() {
        let meta = decode_metadata(
            "name: a\ndescription: b\ntags: [x, y]\nextra:\n  depth: 2\n  ratio: 0.5",
            "t",
        )
        .unwrap();
        assert_eq!(meta.get("tags"), Some(&json!(["x", "y"])));
        assert_eq!(meta.get("extra"), Some(&json!({"depth": 2, "ratio": 0.5})));
    }

    #[test]
    fn test_decode_stringifies_scalar_keys() {
        let meta = decode_metadata("1: one\ntrue: yes", "t").unwrap();
        assert_eq!(meta.get_str("1"), Some("one"));
        assert_eq!(meta.get_str("true"), Some("yes"));
    }

    #[test]
    fn test_decode_yaml_1_2_scalars() {
        let meta = decode_metadata("enabled: yes\nlegacy: off\nstrict: true", "t").unwrap();
        assert_eq!(meta.get("enabled"), Some(&json!("yes")));
        assert_eq!(meta.get("legacy"), Some(&json!("off")));
        assert_eq!(meta.get("strict"), Some(&json!(true)));
    }

    #[test]
    fn test_decode_rejects_complex_keys() {
        let err = decode_metadata("? [a, b]\n: value", "t").unwrap_err();
        assert!(err.is_metadata_syntax());
    }

    #[test]
    fn test_decode_rejects_scalar_document() {
        let err = decode_metadata("just text", "t").unwrap_err();
        match err {
            ParseError::MetadataSyntax { detail, .. } => assert!(detail.contains("string")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_bad_syntax() {
        let err = decode_metadata("name: [unclosed", "skills/x/SKILL.md").unwrap_err();
        assert!(err.is_metadata_syntax());
        assert_eq!(err.origin(), "skills/x/SKILL.md");
    }

    #[test]
    fn test_decode_unwraps_tags() {
        let meta = decode_metadata("name: !custom value", "t").unwrap();
        assert_eq!(meta.get_str("name"), Some("value"));
    }

    #[test]
    fn test_decode_non_finite_float_becomes_null() {
        let meta = decode_metadata("ratio: .nan", "t").unwrap();
        assert_eq!(meta.get("ratio"), Some(&Value::Null));
    }
}
