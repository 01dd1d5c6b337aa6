//! Undeploy command implementation.

use super::common::print_output;
use anyhow::{Context, Result};
use dialoguer::Confirm;
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_store::Deployer;
use tracing::info;

/// Result of an undeploy command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndeployResult {
    /// Skill name
    pub skill: String,
    /// Whether a deployment was removed
    pub removed: bool,
    /// Human-readable outcome
    pub message: String,
}

/// Runs the undeploy command, asking for confirmation unless `yes` is set.
///
/// Exits with [`ExitCode::ERROR`] when nothing was deployed under `name`.
pub fn run(
    config: &DeployConfig,
    name: &str,
    yes: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove deployed skill '{name}' from {}?",
                deployer.deploy_path(name).display()
            ))
            .default(false)
            .interact()
            .context("failed to read confirmation")?;
        if !confirmed {
            info!("Undeploy of {} cancelled", name);
            let result = UndeployResult {
                skill: name.to_string(),
                removed: false,
                message: "cancelled".to_string(),
            };
            print_output(&result, output_format, "undeploy result")?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let removed = deployer
        .undeploy(name)
        .with_context(|| format!("failed to undeploy '{name}'"))?;

    let result = UndeployResult {
        skill: name.to_string(),
        removed,
        message: if removed {
            "deployment removed".to_string()
        } else {
            "skill is not deployed".to_string()
        },
    };
    print_output(&result, output_format, "undeploy result")?;

    Ok(if removed {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    })
}
