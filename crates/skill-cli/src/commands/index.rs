//! Index command implementation.
//!
//! Rebuilds `skill_index.json` from the deployment records and prints a
//! summary of it.

use super::common::print_output;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::{DiskFs, FileSystem};
use skill_deploy_store::{Deployer, IndexGenerator, SkillIndex};
use std::collections::BTreeMap;
use tracing::info;

/// What was written to the skill index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// Location of the index file
    pub path: String,
    /// Number of indexed deployments
    pub total_skills: usize,
    /// When the index was generated
    pub last_updated: DateTime<Utc>,
    /// Deployments per category
    pub categories: BTreeMap<String, usize>,
}

impl IndexSummary {
    fn from_index(path: String, index: SkillIndex) -> Self {
        Self {
            path,
            total_skills: index.total_skills,
            last_updated: index.last_updated,
            categories: index.categories,
        }
    }
}

/// Regenerates the index for `deployer`'s deployments.
pub fn regenerate<F: FileSystem>(
    config: &DeployConfig,
    deployer: &Deployer<F>,
) -> Result<IndexSummary> {
    let generator = IndexGenerator::new(DiskFs, config);
    let index = generator
        .generate(deployer)
        .context("failed to generate skill index")?;
    Ok(IndexSummary::from_index(
        generator.index_path().display().to_string(),
        index,
    ))
}

/// Runs the index command.
pub fn run(config: &DeployConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;
    let summary = regenerate(config, &deployer)?;
    info!("Indexed {} deployed skills", summary.total_skills);

    print_output(&summary, output_format, "index summary")?;
    Ok(ExitCode::SUCCESS)
}
