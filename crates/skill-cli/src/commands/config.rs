//! Config command implementation.
//!
//! The configuration is a TOML file at:
//! - Linux: `~/.config/skill-deploy/config.toml`
//! - macOS: `~/Library/Application Support/skill-deploy/config.toml`
//! - Windows: `%APPDATA%\skill-deploy\config.toml`
//!
//! `--config` points the commands at a different file.

use super::common::{ConfigOverrides, print_output};
use crate::actions::ConfigAction;
use anyhow::{Context, Result};
use serde::Serialize;
use skill_deploy_core::DeployConfig;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use std::path::Path;
use tracing::info;

/// Result of config initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitResult {
    /// Whether a file was written
    pub success: bool,
    /// Outcome description
    pub message: String,
    /// Configuration file location
    pub path: String,
}

/// Location of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Configuration file location
    pub path: String,
    /// Whether the file exists
    pub exists: bool,
}

/// Runs a config action.
pub fn run(
    action: ConfigAction,
    overrides: &ConfigOverrides,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Config action: {:?}", action);

    match action {
        ConfigAction::Show => show_config(overrides, output_format),
        ConfigAction::Init { force } => {
            init_config(&overrides.config_file()?, force, output_format)
        }
        ConfigAction::Path => {
            let path = overrides.config_file()?;
            let result = PathResult {
                exists: path.is_file(),
                path: path.display().to_string(),
            };
            print_output(&result, output_format, "config path")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints the effective configuration, command-line overrides included.
fn show_config(overrides: &ConfigOverrides, output_format: OutputFormat) -> Result<ExitCode> {
    let config = overrides.resolve()?;

    if output_format == OutputFormat::Pretty {
        println!("{}", config.to_toml().context("failed to render configuration")?);
    } else {
        print_output(&config, output_format, "configuration")?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Writes a default configuration file.
///
/// An existing file is left untouched unless `force` is set.
fn init_config(path: &Path, force: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let result = if path.exists() && !force {
        InitResult {
            success: false,
            message: "configuration file already exists (use --force to overwrite)".to_string(),
            path: path.display().to_string(),
        }
    } else {
        DeployConfig::default()
            .save(path)
            .with_context(|| format!("failed to write configuration to {}", path.display()))?;
        InitResult {
            success: true,
            message: "configuration file created with default values".to_string(),
            path: path.display().to_string(),
        }
    };

    print_output(&result, output_format, "init result")?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn overrides_for(path: &Path) -> ConfigOverrides {
        ConfigOverrides {
            config_path: Some(path.to_path_buf()),
            ..ConfigOverrides::default()
        }
    }

    #[test]
    fn test_init_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let code = run(
            ConfigAction::Init { force: false },
            &overrides_for(&path),
            OutputFormat::Json,
        )
        .unwrap();

        assert!(code.is_success());
        assert_eq!(DeployConfig::load(&path).unwrap(), DeployConfig::default());
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "skills_dir = \"mine\"\n").unwrap();

        run(
            ConfigAction::Init { force: false },
            &overrides_for(&path),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "skills_dir = \"mine\"\n");

        run(
            ConfigAction::Init { force: true },
            &overrides_for(&path),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(DeployConfig::load(&path).unwrap(), DeployConfig::default());
    }

    #[test]
    fn test_show_and_path() {
        let temp = TempDir::new().unwrap();
        let overrides = overrides_for(&temp.path().join("config.toml"));

        assert!(run(ConfigAction::Show, &overrides, OutputFormat::Text)
            .unwrap()
            .is_success());
        assert!(run(ConfigAction::Path, &overrides, OutputFormat::Json)
            .unwrap()
            .is_success());
    }

    #[test]
    fn test_show_rejects_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "log_level = \"loud\"\n").unwrap();

        assert!(run(ConfigAction::Show, &overrides_for(&path), OutputFormat::Json).is_err());
    }
}
