//! Deploy command implementation.
//!
//! Copies skills from the source repository into the deployment directory.
//! A full run also regenerates the skill index.

use super::common::print_output;
use super::index::{IndexSummary, regenerate};
use anyhow::{Context, Result};
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_store::{DeployReport, Deployer, Scanner};
use tracing::{debug, error, info};

/// Result of a deploy command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutput {
    /// Per-skill outcome of the run
    #[serde(flatten)]
    pub report: DeployReport,
    /// Index written after a full run
    pub index: Option<IndexSummary>,
}

/// Runs the deploy command.
///
/// Exits with [`ExitCode::INVALID_INPUT`] when the source repository is
/// missing, [`ExitCode::SUCCESS`] when at least one skill was deployed and
/// [`ExitCode::ERROR`] otherwise.
pub fn run(
    config: &DeployConfig,
    skill: Option<&str>,
    force: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Starting skill deployment");

    let scanner = Scanner::from_config(DiskFs, config);
    if let Err(e) = scanner.ensure_root() {
        error!("{e}");
        info!("Clone the skill repository first or pass --skills-dir");
        return Ok(ExitCode::INVALID_INPUT);
    }

    if force {
        debug!("--force given; existing deployments are replaced on every run");
    }

    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;

    let report = match skill {
        Some(name) => deployer.deploy_one(&scanner, name),
        None => deployer.deploy_all(&scanner),
    };

    let index = if skill.is_none() {
        Some(regenerate(config, &deployer)?)
    } else {
        None
    };

    let exit_code = if report.any_succeeded() {
        info!("Skill deployment complete");
        ExitCode::SUCCESS
    } else {
        error!("Skill deployment failed");
        ExitCode::ERROR
    };

    print_output(&DeployOutput { report, index }, output_format, "deployment report")?;
    Ok(exit_code)
}
