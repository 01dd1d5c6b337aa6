//! Validate command implementation.
//!
//! Parses skill descriptors without deploying them and reports structural
//! diagnostics and extracted commands.

use super::common::print_output;
use anyhow::Result;
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_parser::{ValidationReport, extract_commands, validate};
use skill_deploy_store::Scanner;
use tracing::{error, warn};

/// Validation outcome for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillValidation {
    /// Directory name of the skill
    pub skill: String,
    /// Whether the descriptor parsed
    pub parsed: bool,
    /// Parse failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-blocking diagnostics for a parsed descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
    /// Commands found in the body
    pub commands: Vec<String>,
}

/// Runs the validate command over one skill or every discovered skill.
///
/// Exits with [`ExitCode::ERROR`] if any descriptor fails to parse;
/// diagnostics alone never fail the command.
pub fn run(
    config: &DeployConfig,
    name: Option<&str>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let scanner = Scanner::from_config(DiskFs, config);
    if let Err(e) = scanner.ensure_root() {
        error!("{e}");
        return Ok(ExitCode::INVALID_INPUT);
    }

    let names = name.map_or_else(|| scanner.discover(), |n| vec![n.to_string()]);
    let results: Vec<SkillValidation> = names.iter().map(|n| check(&scanner, n)).collect();

    let exit_code = if results.iter().all(|r| r.parsed) {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    };

    print_output(&results, output_format, "validation results")?;
    Ok(exit_code)
}

fn check(scanner: &Scanner<DiskFs>, name: &str) -> SkillValidation {
    match scanner.load(name) {
        Ok(skill) => {
            let report = validate(&skill.descriptor);
            for message in report.messages() {
                warn!("{}: {}", name, message);
            }
            SkillValidation {
                skill: name.to_string(),
                parsed: true,
                error: None,
                commands: extract_commands(&skill.descriptor),
                report: Some(report),
            }
        }
        Err(e) => {
            error!("Failed to parse skill {}: {}", name, e);
            SkillValidation {
                skill: name.to_string(),
                parsed: false,
                error: Some(e.to_string()),
                report: None,
                commands: Vec::new(),
            }
        }
    }
}
