//! Descriptor data model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Required metadata keys, in reporting order.
pub const REQUIRED_FIELDS: [&str; 2] = ["name", "description"];

/// Optional keys with a recognized meaning. Other keys are kept verbatim.
pub const OPTIONAL_FIELDS: [&str; 4] = ["version", "author", "tags", "category"];

/// Version consumers assume when a descriptor has none.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Decoded header block of a descriptor.
///
/// Values are JSON-compatible so the same mapping can be written into a
/// deployment record unchanged.
///
/// # Examples
///
/// ```
/// use skill_deploy_parser::SkillMetadata;
/// use serde_json::json;
///
/// let metadata: SkillMetadata = serde_json::from_value(json!({
///     "name": "pdf",
///     "description": "Work with PDF files",
///     "tags": ["docs", "pdf"],
/// }))
/// .unwrap();
///
/// assert_eq!(metadata.name(), Some("pdf"));
/// assert_eq!(metadata.tags(), vec!["docs", "pdf"]);
/// assert_eq!(metadata.version_or_default(), "1.0.0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillMetadata(Map<String, Value>);

impl SkillMetadata {
    /// Wraps an already decoded mapping.
    #[must_use]
    pub const fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present, even with a null value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the value under `key` if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Renders the value under `key` as display text.
    ///
    /// Strings are returned as-is, other values as JSON text. Null and
    /// absent keys yield `None`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Skill name, when it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Skill description, when it is a string.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Declared version, when it is a string.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get_str("version")
    }

    /// Declared version rendered as text, or [`DEFAULT_VERSION`].
    ///
    /// A numeric `version: 2` renders as `"2"`.
    #[must_use]
    pub fn version_or_default(&self) -> String {
        self.text("version")
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Declared author, when it is a string.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    /// Declared category, when it is a string.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.get_str("category")
    }

    /// Declared tags.
    ///
    /// A sequence yields its elements as text; a single scalar yields one
    /// tag; anything else yields nothing.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        match self.0.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Required keys absent from the mapping, in [`REQUIRED_FIELDS`] order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|field| !self.0.contains_key(**field))
            .map(|field| (*field).to_string())
            .collect()
    }

    /// Number of keys in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the header declared no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SkillMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A heading and the non-empty lines under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Number of leading `#` characters (at least 1)
    pub level: usize,
    /// Heading text without markers
    pub title: String,
    /// Trimmed non-empty lines, in order
    pub content: Vec<String>,
}

/// Shallow structural outline of a descriptor body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    /// Headings in document order
    pub sections: Vec<Section>,
    /// Text of `- Example:` bullets
    pub examples: Vec<String>,
    /// Text of `- Guideline:` bullets
    pub guidelines: Vec<String>,
    /// Always empty here; see [`extract_commands`](crate::extract_commands)
    pub commands: Vec<String>,
}

/// A fully parsed `SKILL.md`.
///
/// Only produced when the header is well formed and every required key is
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Value of the `name` key as text
    pub name: String,
    /// Decoded header mapping
    pub metadata: SkillMetadata,
    /// Body text, trimmed
    pub content: String,
    /// Outline derived from `content`
    pub parsed_content: ParsedContent,
    /// Where the text came from, for diagnostics
    pub source: String,
}

/// Non-blocking diagnostics for a descriptor, bucketed by concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Missing required metadata
    pub metadata: Vec<String>,
    /// Body problems
    pub content: Vec<String>,
    /// Outline problems
    pub structure: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no bucket holds a diagnostic.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.metadata.is_empty() && self.content.is_empty() && self.structure.is_empty()
    }

    /// All diagnostics prefixed with their bucket name.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        [
            ("metadata", &self.metadata),
            ("content", &self.content),
            ("structure", &self.structure),
        ]
        .into_iter()
        .flat_map(|(bucket, items)| items.iter().map(move |m| format!("{bucket}: {m}")))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> SkillMetadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_required_reports_all_in_order() {
        let empty = SkillMetadata::default();
        assert_eq!(empty.missing_required(), vec!["name", "description"]);

        let only_name = metadata(json!({"name": "x"}));
        assert_eq!(only_name.missing_required(), vec!["description"]);
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let meta = metadata(json!({"name": null, "description": null}));
        assert!(meta.missing_required().is_empty());
        assert_eq!(meta.name(), None);
        assert_eq!(meta.text("name"), None);
    }

    #[test]
    fn test_text_renders_non_strings() {
        let meta = metadata(json!({"version": 2, "flag": true}));
        assert_eq!(meta.text("version").as_deref(), Some("2"));
        assert_eq!(meta.version_or_default(), "2");
        assert_eq!(meta.text("flag").as_deref(), Some("true"));
        assert_eq!(meta.version(), None);
    }

    #[test]
    fn test_tags_variants() {
        assert_eq!(
            metadata(json!({"tags": ["a", 1, null]})).tags(),
            vec!["a", "1"]
        );
        assert_eq!(metadata(json!({"tags": "solo"})).tags(), vec!["solo"]);
        assert!(metadata(json!({"tags": {"k": "v"}})).tags().is_empty());
        assert!(SkillMetadata::default().tags().is_empty());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let meta = metadata(json!({"name": "x", "license": "MIT"}));
        assert_eq!(meta.get_str("license"), Some("MIT"));
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_metadata_serializes_transparently() {
        let meta = metadata(json!({"name": "x"}));
        assert_eq!(serde_json::to_value(&meta).unwrap(), json!({"name": "x"}));
    }

    #[test]
    fn test_report_messages() {
        let report = ValidationReport {
            metadata: vec!["missing required field: name".to_string()],
            content: Vec::new(),
            structure: vec!["no sections".to_string()],
        };
        assert!(!report.is_clean());
        assert_eq!(
            report.messages(),
            vec![
                "metadata: missing required field: name",
                "structure: no sections"
            ]
        );
        assert!(ValidationReport::default().is_clean());
    }
}
