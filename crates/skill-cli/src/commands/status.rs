//! Status command implementation.

use super::common::print_output;
use anyhow::{Context, Result};
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_store::{DeploymentStatus, Deployer};

/// Deployment status of a skill, or its absence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOutput {
    /// Requested skill name
    pub skill: String,
    /// Whether a deployment exists
    pub deployed: bool,
    /// Whether every tracked file is present
    pub intact: bool,
    /// Deployment record and file checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
}

/// Runs the status command.
///
/// Exits with [`ExitCode::ERROR`] when the skill is not deployed.
pub fn run(config: &DeployConfig, name: &str, output_format: OutputFormat) -> Result<ExitCode> {
    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;
    let status = deployer
        .status(name)
        .with_context(|| format!("failed to read deployment status of '{name}'"))?;

    let output = StatusOutput {
        skill: name.to_string(),
        deployed: status.is_some(),
        intact: status.as_ref().is_some_and(DeploymentStatus::is_intact),
        status,
    };
    let exit_code = if output.deployed {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    };

    print_output(&output, output_format, "deployment status")?;
    Ok(exit_code)
}
