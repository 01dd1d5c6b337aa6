//! List command implementation.
//!
//! Shows every skill in the source repository next to its deployment state,
//! then regenerates the skill index.

use super::common::{print_output, truncate};
use super::index::{IndexSummary, regenerate};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_store::{
    DEFAULT_AUTHOR, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, DeploymentStatus, Deployer, Scanner,
};
use std::collections::BTreeSet;
use tracing::warn;

const DESCRIPTION_WIDTH: usize = 48;

/// One source skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    /// Directory name in the source repository
    pub name: String,
    /// Whether a deployment with this name exists
    pub deployed: bool,
    /// Description, shortened for display
    pub description: String,
    /// Declared version
    pub version: String,
    /// Declared category
    pub category: String,
    /// Parse failure, when the descriptor could not be loaded
    pub error: Option<String>,
}

/// Details of one deployed skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedDetail {
    /// Deployed skill name
    pub name: String,
    /// Full description
    pub description: String,
    /// Declared version
    pub version: String,
    /// Declared author
    pub author: String,
    /// Deployment time
    pub deployed_at: DateTime<Utc>,
    /// Number of tracked files
    pub file_count: usize,
    /// Tracked files that are gone
    pub missing_files: Vec<String>,
}

impl From<&DeploymentStatus> for DeployedDetail {
    fn from(status: &DeploymentStatus) -> Self {
        let metadata = &status.record.metadata;
        Self {
            name: status.record.skill_name.clone(),
            description: metadata
                .text("description")
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            version: metadata.version_or_default(),
            author: metadata
                .text("author")
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            deployed_at: status.record.deployed_at,
            file_count: status.files_exist.len(),
            missing_files: status
                .missing_files()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Result of a list command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListOutput {
    /// Source skills in discovery order
    pub skills: Vec<SkillRow>,
    /// Skills found in the source repository
    pub available: usize,
    /// Skills currently deployed
    pub deployed: usize,
    /// Deployment details, with `--details`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<DeployedDetail>>,
    /// Index regenerated after listing
    pub index: IndexSummary,
}

/// Runs the list command.
pub fn run(config: &DeployConfig, details: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let scanner = Scanner::from_config(DiskFs, config);
    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;

    let deployments = deployer.list_deployed();
    let deployed_names: BTreeSet<&str> = deployments
        .iter()
        .map(|s| s.record.skill_name.as_str())
        .collect();

    let names = scanner.discover();
    let skills: Vec<SkillRow> = names
        .iter()
        .map(|name| match scanner.load(name) {
            Ok(skill) => {
                let metadata = &skill.descriptor.metadata;
                SkillRow {
                    deployed: deployed_names.contains(name.as_str())
                        || deployed_names.contains(skill.descriptor.name.as_str()),
                    description: truncate(
                        &metadata
                            .text("description")
                            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                        DESCRIPTION_WIDTH,
                    ),
                    version: metadata.version_or_default(),
                    category: metadata
                        .text("category")
                        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    name: name.clone(),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Failed to load skill {}: {}", name, e);
                SkillRow {
                    name: name.clone(),
                    deployed: deployed_names.contains(name.as_str()),
                    description: String::new(),
                    version: String::new(),
                    category: String::new(),
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let output = ListOutput {
        available: skills.len(),
        deployed: deployments.len(),
        skills,
        details: details.then(|| deployments.iter().map(DeployedDetail::from).collect()),
        index: regenerate(config, &deployer)?,
    };

    if output_format == OutputFormat::Pretty {
        println!("{}", render_table(&output));
    } else {
        print_output(&output, output_format, "skill list")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders the list as a terminal table followed by statistics.
#[must_use]
pub fn render_table(output: &ListOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!(
            "{:<30} {:<12} {:<50} {:<10} {:<15}",
            "Skill", "Status", "Description", "Version", "Category"
        )
        .bold()
        .magenta()
    ));

    for row in &output.skills {
        let status = match (&row.error, row.deployed) {
            (Some(_), _) => format!("{:<12}", "invalid").red(),
            (None, true) => format!("{:<12}", "deployed").green(),
            (None, false) => format!("{:<12}", "pending").yellow(),
        };
        let description = row.error.as_deref().map_or_else(
            || row.description.clone(),
            |e| truncate(e, DESCRIPTION_WIDTH),
        );
        out.push_str(&format!(
            "{} {status} {:<50} {:<10} {:<15}\n",
            format!("{:<30}", row.name).cyan(),
            description,
            row.version,
            row.category
        ));
    }

    out.push_str(&format!(
        "\n{}\nSkills in repository: {}\nDeployed skills: {}\n",
        "Statistics".bold(),
        output.available,
        output.deployed
    ));

    if let Some(details) = output.details.as_ref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n{}\n", "Deployed skill details".bold()));
        for detail in details {
            out.push_str(&format!(
                "\n{}\n  Description: {}\n  Version:     {}\n  Author:      {}\n  Deployed at: {}\n  Files:       {}\n",
                detail.name.cyan().bold(),
                detail.description,
                detail.version,
                detail.author,
                detail.deployed_at.to_rfc3339(),
                detail.file_count
            ));
            if !detail.missing_files.is_empty() {
                out.push_str(&format!(
                    "  {} {}\n",
                    "Missing:".red(),
                    detail.missing_files.join(", ")
                ));
            }
        }
    }

    out.push_str(&format!(
        "\n{} {}",
        "Skill index written:".green().bold(),
        output.index.path
    ));
    out
}
