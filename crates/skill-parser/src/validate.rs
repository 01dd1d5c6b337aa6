//! Non-blocking descriptor checks.

use crate::types::{SkillDescriptor, ValidationReport};

/// Inspects a descriptor and reports problems without failing.
///
/// Required fields are recomputed from the metadata rather than trusted
/// from the parse step, so descriptors built by hand are checked too.
///
/// # Examples
///
/// ```
/// use skill_deploy_parser::{parse, validate};
///
/// let skill = parse("---\nname: a\ndescription: b\n---\n", "inline").unwrap();
/// let report = validate(&skill);
/// assert!(report.metadata.is_empty());
/// assert_eq!(report.content.len(), 1);
/// assert_eq!(report.structure.len(), 1);
/// ```
#[must_use]
pub fn validate(descriptor: &SkillDescriptor) -> ValidationReport {
    let metadata = descriptor
        .metadata
        .missing_required()
        .into_iter()
        .map(|field| format!("missing required field: {field}"))
        .collect();

    let mut content = Vec::new();
    if descriptor.content.trim().is_empty() {
        content.push("skill content is empty".to_string());
    }

    let mut structure = Vec::new();
    if descriptor.parsed_content.sections.is_empty() {
        structure.push("skill has no section structure".to_string());
    }

    ValidationReport {
        metadata,
        content,
        structure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParsedContent, SkillMetadata};

    fn descriptor(metadata: SkillMetadata, content: &str) -> SkillDescriptor {
        SkillDescriptor {
            name: "t".to_string(),
            metadata,
            content: content.to_string(),
            parsed_content: crate::extract_content(content),
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_clean_descriptor() {
        let meta = serde_json::from_value(serde_json::json!({"name": "t", "description": "d"}))
            .unwrap();
        assert!(validate(&descriptor(meta, "# Heading\ntext")).is_clean());
    }

    #[test]
    fn test_hand_built_descriptor_missing_metadata() {
        let report = validate(&descriptor(SkillMetadata::default(), "# H"));
        assert_eq!(
            report.metadata,
            vec![
                "missing required field: name",
                "missing required field: description"
            ]
        );
        assert!(report.content.is_empty());
    }

    #[test]
    fn test_whitespace_only_content() {
        let mut d = descriptor(SkillMetadata::default(), "");
        d.content = "   \n".to_string();
        d.parsed_content = ParsedContent::default();
        let report = validate(&d);
        assert_eq!(report.content.len(), 1);
        assert_eq!(report.structure.len(), 1);
    }
}
