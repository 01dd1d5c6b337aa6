//! Helpers shared across CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;
use skill_deploy_core::cli::OutputFormat;
use skill_deploy_core::{DeployConfig, default_config_path};
use std::path::PathBuf;
use tracing::debug;

/// Directory overrides given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Explicit configuration file location (`--config`)
    pub config_path: Option<PathBuf>,
    /// `--skills-dir`
    pub skills_dir: Option<PathBuf>,
    /// `--deployed-dir`
    pub deployed_dir: Option<PathBuf>,
    /// `--config-dir`
    pub config_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Location of the configuration file: `--config` or the platform default.
    pub fn config_file(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => default_config_path().context("failed to locate configuration file"),
        }
    }

    /// Loads the configuration file and applies the directory flags on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or the merged configuration
    /// is invalid.
    pub fn resolve(&self) -> Result<DeployConfig> {
        let path = self.config_file()?;
        let mut config = DeployConfig::load(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        if let Some(dir) = &self.skills_dir {
            config.skills_dir.clone_from(dir);
        }
        if let Some(dir) = &self.deployed_dir {
            config.deployed_dir.clone_from(dir);
        }
        if let Some(dir) = &self.config_dir {
            config.config_dir.clone_from(dir);
        }

        config.validate().context("invalid configuration")?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}

/// Formats `data` and prints it to stdout.
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat, what: &str) -> Result<()> {
    let formatted = crate::formatters::format_output(data, format)
        .with_context(|| format!("failed to format {what}"))?;
    println!("{formatted}");
    Ok(())
}

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
