//! Structural outline extraction from a descriptor body.

use crate::types::{ParsedContent, Section};

const EXAMPLE_MARKER: &str = "- Example:";
const GUIDELINE_MARKER: &str = "- Guideline:";
const FENCE_MARKER: &str = "```";

/// Builds the outline of a Markdown body.
///
/// Each line is classified by the first matching rule:
///
/// 1. starts with `#`: opens a section whose level is the number of
///    leading `#` characters
/// 2. trimmed line starts with `- Example:`: collected into `examples`
/// 3. trimmed line starts with `- Guideline:`: collected into `guidelines`
/// 4. trimmed line starts with a code fence: ignored, fenced bodies are
///    not tracked
/// 5. any other non-blank line is appended, trimmed, to the current section
///
/// Lines before the first heading are dropped.
///
/// # Examples
///
/// ```
/// use skill_deploy_parser::extract_content;
///
/// let outline = extract_content("# Title\nline one\n- Example: do X");
/// assert_eq!(outline.sections[0].content, vec!["line one"]);
/// assert_eq!(outline.examples, vec!["do X"]);
/// ```
#[must_use]
pub fn extract_content(body: &str) -> ParsedContent {
    let mut parsed = ParsedContent::default();

    for line in body.lines() {
        let trimmed = line.trim();

        if line.starts_with('#') {
            let title = line.trim_start_matches('#');
            parsed.sections.push(Section {
                level: line.len() - title.len(),
                title: title.trim().to_string(),
                content: Vec::new(),
            });
        } else if let Some(example) = trimmed.strip_prefix(EXAMPLE_MARKER) {
            parsed.examples.push(example.trim().to_string());
        } else if let Some(guideline) = trimmed.strip_prefix(GUIDELINE_MARKER) {
            parsed.guidelines.push(guideline.trim().to_string());
        } else if trimmed.starts_with(FENCE_MARKER) {
            // fence markers only; the lines between them fall through as content
        } else if !trimmed.is_empty()
            && let Some(section) = parsed.sections.last_mut()
        {
            section.content.push(trimmed.to_string());
        }
    }

    parsed
}
