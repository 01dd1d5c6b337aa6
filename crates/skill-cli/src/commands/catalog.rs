//! Catalog command implementation.
//!
//! Writes a Markdown overview of every source and deployed skill.

use super::common::print_output;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use skill_deploy_files::DiskFs;
use skill_deploy_store::{Catalog, Deployer, Scanner};
use std::collections::BTreeMap;
use std::path::Path;

/// Result of a catalog command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogResult {
    /// Location of the written catalog
    pub path: String,
    /// Unique skills listed
    pub total_skills: usize,
    /// Skills per category
    pub categories: BTreeMap<String, usize>,
}

/// Runs the catalog command.
pub fn run(config: &DeployConfig, output: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let scanner = Scanner::from_config(DiskFs, config);
    let deployer =
        Deployer::new(DiskFs, config).context("failed to prepare deployment directories")?;

    let catalog = Catalog::build(&scanner, &deployer);
    catalog
        .write_to(&DiskFs, output, Utc::now())
        .with_context(|| format!("failed to write catalog to {}", output.display()))?;

    let result = CatalogResult {
        path: output.display().to_string(),
        total_skills: catalog.len(),
        categories: catalog
            .by_category()
            .into_iter()
            .map(|(category, skills)| (category.to_string(), skills.len()))
            .collect(),
    };
    print_output(&result, output_format, "catalog result")?;
    Ok(ExitCode::SUCCESS)
}
