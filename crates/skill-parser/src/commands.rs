//! Command pattern extraction from descriptor bodies.

use crate::types::SkillDescriptor;
use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled label patterns, applied in this order
static COMMAND_ZH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)命令:\s*(.+)").expect("valid regex"));
static COMMAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)Command:\s*(.+)").expect("valid regex"));
static USAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)Usage:\s*(.+)").expect("valid regex"));
static USAGE_ZH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)用法:\s*(.+)").expect("valid regex"));

/// Collects the text following `命令:`, `Command:`, `Usage:` and `用法:`
/// labels in the descriptor body.
///
/// Labels match case-insensitively anywhere in a line. Each pattern scans
/// the whole body before the next one runs, so every `命令:` capture comes
/// before every `Command:` capture regardless of line order. Captures keep
/// their trailing whitespace.
///
/// NOTE: results are grouped by label, not by position in the document.
/// Callers expecting document order should sort by position themselves
/// until product decides whether grouping is intended.
///
/// # Examples
///
/// ```
/// use skill_deploy_parser::{extract_commands, parse};
///
/// let skill = parse(
///     "---\nname: a\ndescription: b\n---\n用法: run it\nCommand: build",
///     "inline",
/// )
/// .unwrap();
/// assert_eq!(extract_commands(&skill), vec!["build", "run it"]);
/// ```
#[must_use]
pub fn extract_commands(descriptor: &SkillDescriptor) -> Vec<String> {
    extract_commands_from(&descriptor.content)
}

/// Same as [`extract_commands`] over raw body text.
#[must_use]
pub fn extract_commands_from(content: &str) -> Vec<String> {
    [
        &*COMMAND_ZH_REGEX,
        &*COMMAND_REGEX,
        &*USAGE_REGEX,
        &*USAGE_ZH_REGEX,
    ]
    .into_iter()
    .flat_map(|re| {
        re.captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
    })
    .collect()
}
