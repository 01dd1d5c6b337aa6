//! Output formatters for CLI commands.
//!
//! Every command result is a `Serialize` type rendered in one of three modes:
//! pretty JSON for `json`, flat `key: value` lines for `text`, and an
//! indented colored outline for `pretty`.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use skill_deploy_core::cli::OutputFormat;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use skill_deploy_cli::formatters::format_output;
/// use skill_deploy_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Summary {
///     total_skills: usize,
/// }
///
/// let output = format_output(&Summary { total_skills: 3 }, OutputFormat::Text)?;
/// assert_eq!(output, "total_skills: 3");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One `path: value` line per scalar, with nested keys joined by `.` and
/// array positions in brackets. Suitable for `grep` and shell scripts.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Format data as flat `key: value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, prefix: &str, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, val) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    flatten(val, &path, lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    flatten(item, &format!("{prefix}[{i}]"), lines);
                }
            }
            other => {
                let rendered = match other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                if prefix.is_empty() {
                    lines.push(rendered);
                } else {
                    lines.push(format!("{prefix}: {rendered}"));
                }
            }
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Format data as a colored, indented outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        match &value {
            Value::Object(_) | Value::Array(_) => write_nested(&value, 0, &mut out),
            scalar => out.push_str(&scalar_text(scalar)),
        }
        Ok(out.trim_end().to_string())
    }

    fn write_nested(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    let key = key.blue().bold();
                    if is_leaf(val) {
                        out.push_str(&format!("{pad}{key}: {}\n", scalar_text(val)));
                    } else {
                        out.push_str(&format!("{pad}{key}:\n"));
                        write_nested(val, indent + 1, out);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_leaf(item) {
                        out.push_str(&format!("{pad}- {}\n", scalar_text(item)));
                    } else {
                        out.push_str(&format!("{pad}-\n"));
                        write_nested(item, indent + 1, out);
                    }
                }
            }
            scalar => out.push_str(&format!("{pad}{}\n", scalar_text(scalar))),
        }
    }

    fn is_leaf(value: &Value) -> bool {
        match value {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => true,
        }
    }

    fn scalar_text(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(true) => "yes".green().to_string(),
            Value::Bool(false) => "no".red().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) => "[]".dimmed().to_string(),
            Value::Object(_) => "{}".dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Status {
        skill_name: String,
        intact: bool,
        files: Vec<String>,
        metadata: serde_json::Value,
    }

    fn sample() -> Status {
        Status {
            skill_name: "pdf".to_string(),
            intact: true,
            files: vec!["SKILL.md".to_string(), "scripts/run.py".to_string()],
            metadata: serde_json::json!({"version": "1.0.0", "tags": []}),
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["skill_name"], "pdf");
        assert!(output.contains("\n  \"intact\": true"));
    }

    #[test]
    fn test_text_format_flattens_paths() {
        let output = text::format(&sample()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines.contains(&"skill_name: pdf"));
        assert!(lines.contains(&"intact: true"));
        assert!(lines.contains(&"files[1]: scripts/run.py"));
        assert!(lines.contains(&"metadata.version: 1.0.0"));
        assert!(lines.contains(&"metadata.tags: []"));
    }

    #[test]
    fn test_text_format_scalar() {
        assert_eq!(text::format(&"plain").unwrap(), "plain");
    }

    #[test]
    fn test_pretty_format_outline() {
        colored::control::set_override(false);
        let output = pretty::format(&sample()).unwrap();
        assert!(output.contains("skill_name: pdf"));
        assert!(output.contains("intact: yes"));
        assert!(output.contains("files:\n  - SKILL.md\n  - scripts/run.py"));
        assert!(output.contains("metadata:\n  tags: []\n  version: 1.0.0"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = sample();
        assert!(format_output(&data, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(
            format_output(&data, OutputFormat::Text)
                .unwrap()
                .contains("skill_name: pdf")
        );
    }
}
