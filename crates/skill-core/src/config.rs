//! Deployment configuration.
//!
//! Every component receives a [`DeployConfig`] at construction time. The
//! configuration is read from TOML at
//! `<platform config dir>/skill-deploy/config.toml` when present.
//!
//! ```toml
//! skills_dir = "skills"
//! deployed_dir = "deployed_skills"
//! config_dir = "config"
//! index_file_name = "skill_index.json"
//! resource_dirs = ["scripts", "resources", "examples", "templates"]
//! log_level = "info"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the descriptor file inside every skill directory.
pub const DESCRIPTOR_FILE: &str = "SKILL.md";

/// Name of the per-deployment record file.
pub const DEPLOYMENT_RECORD_FILE: &str = "deployment.json";

/// Name of the generated usage guide inside each deployment.
pub const USAGE_FILE: &str = "USAGE.md";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Directory layout and logging settings for a deployment run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// Source repository root holding one directory per skill
    pub skills_dir: PathBuf,

    /// Target directory receiving deployed skills
    pub deployed_dir: PathBuf,

    /// Directory holding the generated index
    pub config_dir: PathBuf,

    /// File name of the generated index inside `config_dir`
    pub index_file_name: String,

    /// Resource subdirectories copied along with `SKILL.md`
    pub resource_dirs: Vec<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            skills_dir: PathBuf::from("skills"),
            deployed_dir: PathBuf::from("deployed_skills"),
            config_dir: PathBuf::from("config"),
            index_file_name: "skill_index.json".to_string(),
            resource_dirs: ["scripts", "resources", "examples", "templates"]
                .into_iter()
                .map(String::from)
                .collect(),
            log_level: "info".to_string(),
        }
    }
}

impl DeployConfig {
    /// Returns the full path of the generated index file.
    ///
    /// # Examples
    ///
    /// ```
    /// use skill_deploy_core::DeployConfig;
    /// use std::path::Path;
    ///
    /// let config = DeployConfig::default();
    /// assert_eq!(config.index_path(), Path::new("config/skill_index.json"));
    /// ```
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.config_dir.join(&self.index_file_name)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a directory or file name is empty,
    /// the index file name contains a path separator, a resource directory
    /// name is not a single path component, or the log level is unknown.
    pub fn validate(&self) -> Result<()> {
        for (key, dir) in [
            ("skills_dir", &self.skills_dir),
            ("deployed_dir", &self.deployed_dir),
            ("config_dir", &self.config_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(config_error(format!("{key} cannot be empty")));
            }
        }

        if !is_plain_component(&self.index_file_name) {
            return Err(config_error(format!(
                "invalid index_file_name '{}', must be a plain file name",
                self.index_file_name
            )));
        }

        if let Some(bad) = self.resource_dirs.iter().find(|d| !is_plain_component(d)) {
            return Err(config_error(format!(
                "invalid resource directory '{bad}', must be a plain directory name"
            )));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(config_error(format!(
                "invalid log_level '{}', must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// TOML, or fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path` as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::ConfigIo {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let toml_str = toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })?;

        fs::write(path, toml_str).map_err(|source| Error::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })
    }
}

/// Returns the platform default location of the configuration file.
///
/// - Linux: `~/.config/skill-deploy/config.toml`
/// - macOS: `~/Library/Application Support/skill-deploy/config.toml`
/// - Windows: `%APPDATA%\skill-deploy\config.toml`
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the platform has no config directory.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| Error::ConfigError {
        message: "failed to determine config directory".to_string(),
    })?;
    Ok(base.join("skill-deploy").join("config.toml"))
}

fn config_error(message: String) -> Error {
    Error::ConfigError { message }
}

fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.chars().any(char::is_control)
}
