//! Behavioral tests for descriptor parsing.
//!
//! Tests cover:
//! - Successful parse with verbatim metadata
//! - Header failures (missing, unclosed, bad YAML)
//! - Required field reporting
//! - Outline extraction
//! - Delimiters inside the body
//! - Command ordering
//! - Validation buckets

use skill_deploy_parser::{
    ParseError, ParsedContent, SkillDescriptor, extract_commands, extract_content, parse, validate,
};

const WELL_FORMED: &str = "---
name: pdf-tools
description: Read, merge and split PDF files
version: 2.1.0
author: Docs Team
tags:
  - pdf
  - documents
category: documents
license: MIT
---

# PDF Tools

Work with PDF documents.

## Merging
- Example: merge a.pdf b.pdf
- Guideline: keep page order
Pages are appended in argument order.
";

#[test]
fn test_well_formed_descriptor() {
    let skill = parse(WELL_FORMED, "skills/pdf-tools/SKILL.md").unwrap();

    assert_eq!(skill.name, "pdf-tools");
    assert_eq!(skill.metadata.name(), Some("pdf-tools"));
    assert_eq!(
        skill.metadata.description(),
        Some("Read, merge and split PDF files")
    );
    assert_eq!(skill.metadata.version(), Some("2.1.0"));
    assert_eq!(skill.metadata.author(), Some("Docs Team"));
    assert_eq!(skill.metadata.tags(), vec!["pdf", "documents"]);
    assert_eq!(skill.metadata.category(), Some("documents"));
    assert_eq!(skill.metadata.get_str("license"), Some("MIT"));
    assert_eq!(skill.source, "skills/pdf-tools/SKILL.md");
    assert!(skill.content.starts_with("# PDF Tools"));
    assert!(skill.content.ends_with("argument order."));
    assert!(skill.parsed_content.commands.is_empty());
}

#[test]
fn test_missing_leading_delimiter() {
    let err = parse("# Just markdown\n", "plain.md").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingHeader {
            origin: "plain.md".to_string()
        }
    );
}

#[test]
fn test_missing_closing_delimiter() {
    let err = parse("---\nname: a\ndescription: b\n# Body", "open.md").unwrap_err();
    assert!(matches!(err, ParseError::MalformedHeader { .. }));
    assert_eq!(err.origin(), "open.md");
}

#[test]
fn test_metadata_syntax_error_carries_detail() {
    let err = parse("---\nname: [a\n---\n", "bad.md").unwrap_err();
    match err {
        ParseError::MetadataSyntax { origin, detail } => {
            assert_eq!(origin, "bad.md");
            assert!(!detail.is_empty());
        }
        other => panic!("expected MetadataSyntax, got {other:?}"),
    }
}

#[test]
fn test_missing_description_only() {
    let err = parse("---\nname: lonely\n---\n# Body", "x").unwrap_err();
    assert_eq!(err.missing_fields(), ["description".to_string()]);
}

#[test]
fn test_missing_every_required_field() {
    let err = parse("---\nversion: 1.0.0\n---\n", "x").unwrap_err();
    assert_eq!(
        err.missing_fields(),
        ["name".to_string(), "description".to_string()]
    );
}

#[test]
fn test_empty_header_reports_missing_fields() {
    let err = parse("---\n---\n# Body", "x").unwrap_err();
    assert_eq!(err.missing_fields().len(), 2);
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse(WELL_FORMED, "a").unwrap();
    let second = parse(WELL_FORMED, "a").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_outline_rederivation_is_stable() {
    let skill = parse(WELL_FORMED, "a").unwrap();
    assert_eq!(extract_content(&skill.content), skill.parsed_content);
}

#[test]
fn test_structural_extraction() {
    let text = "---\nname: s\ndescription: d\n---\n# Title\nline one\n\n## Sub\n- Example: do X\n- Guideline: always Y\nline two\n";
    let skill = parse(text, "x").unwrap();
    let ParsedContent {
        sections,
        examples,
        guidelines,
        commands,
    } = skill.parsed_content;

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].level, 1);
    assert_eq!(sections[0].title, "Title");
    assert_eq!(sections[0].content, vec!["line one"]);
    assert_eq!(sections[1].level, 2);
    assert_eq!(sections[1].title, "Sub");
    assert_eq!(sections[1].content, vec!["line two"]);
    assert_eq!(examples, vec!["do X"]);
    assert_eq!(guidelines, vec!["always Y"]);
    assert!(commands.is_empty());
}

#[test]
fn test_third_delimiter_is_literal_body() {
    let text = "---\nname: s\ndescription: d\n---\n# Title\nabove\n---\nbelow\n";
    let skill = parse(text, "x").unwrap();

    assert_eq!(skill.content, "# Title\nabove\n---\nbelow");
    assert_eq!(
        skill.parsed_content.sections[0].content,
        vec!["above", "---", "below"]
    );
}

#[test]
fn test_commands_follow_pattern_order() {
    let text = "---\nname: s\ndescription: d\n---\n用法: run it\nCommand: build\n";
    let skill = parse(text, "x").unwrap();
    assert_eq!(extract_commands(&skill), vec!["build", "run it"]);
}

#[test]
fn test_validate_empty_content_only() {
    let skill = SkillDescriptor {
        content: String::new(),
        ..parse(WELL_FORMED, "x").unwrap()
    };
    let report = validate(&skill);

    assert!(!report.content.is_empty());
    assert!(report.metadata.is_empty());
    assert!(report.structure.is_empty());
}

#[test]
fn test_validate_body_without_headings() {
    let skill = parse("---\nname: s\ndescription: d\n---\nno headings here", "x").unwrap();
    let report = validate(&skill);

    assert!(report.content.is_empty());
    assert_eq!(report.structure.len(), 1);
}

#[test]
fn test_non_string_name_rendered_as_text() {
    let skill = parse("---\nname: 42\ndescription: numeric\n---\n", "x").unwrap();
    assert_eq!(skill.name, "42");

    let skill = parse("---\nname:\ndescription: null name\n---\n", "x").unwrap();
    assert_eq!(skill.name, "");
}

#[test]
fn test_descriptor_serializes_to_json() {
    let skill = parse(WELL_FORMED, "x").unwrap();
    let json = serde_json::to_value(&skill).unwrap();

    assert_eq!(json["name"], "pdf-tools");
    assert_eq!(json["metadata"]["category"], "documents");
    assert_eq!(json["parsed_content"]["examples"][0], "merge a.pdf b.pdf");
}
