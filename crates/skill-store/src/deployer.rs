//! Copying skills into the deployment directory.
//!
//! Each deployment lives in its own directory:
//!
//! ```text
//! deployed_skills/
//! └── pdf/
//!     ├── SKILL.md
//!     ├── scripts/...        # copied resource directories
//!     ├── deployment.json    # DeploymentRecord
//!     └── USAGE.md           # generated usage guide
//! ```

use crate::error::{Result, StoreError};
use crate::name::validate_skill_name;
use crate::scanner::Scanner;
use crate::types::{
    DEFAULT_AUTHOR, DEFAULT_DESCRIPTION, DeployReport, DeployWarning, DeploymentRecord,
    DeploymentStatus,
};
use chrono::{DateTime, SecondsFormat, Utc};
use skill_deploy_core::{DEPLOYMENT_RECORD_FILE, DESCRIPTOR_FILE, DeployConfig, USAGE_FILE};
use skill_deploy_files::{FileSystem, to_slash};
use skill_deploy_parser::{SkillDescriptor, validate};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// RAII guard that removes a half-written deployment on drop.
///
/// Call [`commit`](Self::commit) once every file is in place.
struct DeploymentGuard<'a, F: FileSystem> {
    fs: &'a F,
    path: PathBuf,
    cleanup: bool,
}

impl<'a, F: FileSystem> DeploymentGuard<'a, F> {
    const fn new(fs: &'a F, path: PathBuf) -> Self {
        Self {
            fs,
            path,
            cleanup: true,
        }
    }

    fn commit(mut self) {
        self.cleanup = false;
    }
}

impl<F: FileSystem> Drop for DeploymentGuard<'_, F> {
    fn drop(&mut self) {
        if self.cleanup {
            if let Err(e) = self.fs.remove_dir_all(&self.path) {
                warn!(
                    "Failed to clean up deployment {}: {}",
                    self.path.display(),
                    e
                );
            } else {
                debug!("Cleaned up incomplete deployment: {}", self.path.display());
            }
        }
    }
}

/// Deploys skills and reports on existing deployments.
#[derive(Debug, Clone)]
pub struct Deployer<F> {
    fs: F,
    deployed_dir: PathBuf,
    config_dir: PathBuf,
    resource_dirs: Vec<String>,
}

impl<F: FileSystem> Deployer<F> {
    /// Creates a deployer, creating the deployment and config directories.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be created.
    pub fn new(fs: F, config: &DeployConfig) -> Result<Self> {
        fs.create_dir_all(&config.deployed_dir)?;
        fs.create_dir_all(&config.config_dir)?;

        debug!(
            "Deployer ready: deployed_dir={}, config_dir={}",
            config.deployed_dir.display(),
            config.config_dir.display()
        );

        Ok(Self {
            fs,
            deployed_dir: config.deployed_dir.clone(),
            config_dir: config.config_dir.clone(),
            resource_dirs: config.resource_dirs.clone(),
        })
    }

    /// Deployment root.
    #[must_use]
    pub fn deployed_dir(&self) -> &Path {
        &self.deployed_dir
    }

    /// Directory holding generated indexes.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Deployment directory of the named skill.
    #[must_use]
    pub fn deploy_path(&self, name: &str) -> PathBuf {
        self.deployed_dir.join(name)
    }

    /// Deploys one skill from `source_dir`, replacing any earlier deployment
    /// of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSkillName`] if the descriptor name cannot
    /// be a directory name, or a filesystem error if copying fails. A failed
    /// deployment leaves no directory behind.
    pub fn deploy(
        &self,
        source_dir: &Path,
        descriptor: &SkillDescriptor,
    ) -> Result<DeploymentRecord> {
        let name = descriptor.name.as_str();
        validate_skill_name(name)?;

        let deploy_path = self.deploy_path(name);
        if self.fs.exists(&deploy_path) {
            debug!("Removing previous deployment: {}", deploy_path.display());
            self.fs.remove_dir_all(&deploy_path)?;
        }

        self.fs.create_dir_all(&deploy_path)?;
        let guard = DeploymentGuard::new(&self.fs, deploy_path.clone());

        self.copy_skill_files(source_dir, &deploy_path)?;

        let record = DeploymentRecord {
            skill_name: name.to_string(),
            metadata: descriptor.metadata.clone(),
            deployed_at: Utc::now(),
            source: descriptor.source.clone(),
            resources: self.deployed_resources(&deploy_path)?,
        };
        self.write_record(&deploy_path, &record)?;

        let usage = render_usage_guide(name, descriptor, record.deployed_at);
        self.fs
            .write(&deploy_path.join(USAGE_FILE), usage.as_bytes())?;

        guard.commit();
        info!("Deployed skill: {}", name);
        Ok(record)
    }

    fn copy_skill_files(&self, source_dir: &Path, deploy_path: &Path) -> Result<()> {
        let descriptor = source_dir.join(DESCRIPTOR_FILE);
        if self.fs.is_file(&descriptor) {
            self.fs
                .copy_file(&descriptor, &deploy_path.join(DESCRIPTOR_FILE))?;
        }

        for dir in &self.resource_dirs {
            let from = source_dir.join(dir);
            if self.fs.is_dir(&from) {
                let copied = self.fs.copy_tree(&from, &deploy_path.join(dir))?;
                debug!("Copied {} files from {}", copied, from.display());
            }
        }
        Ok(())
    }

    fn deployed_resources(&self, deploy_path: &Path) -> Result<Vec<String>> {
        Ok(self
            .fs
            .walk_files(deploy_path)?
            .iter()
            .filter(|path| path.as_path() != Path::new(DEPLOYMENT_RECORD_FILE))
            .map(|path| to_slash(path))
            .collect())
    }

    fn write_record(&self, deploy_path: &Path, record: &DeploymentRecord) -> Result<()> {
        let path = deploy_path.join(DEPLOYMENT_RECORD_FILE);
        let json = serde_json::to_string_pretty(record).map_err(|source| {
            StoreError::Serialize {
                path: path.display().to_string(),
                source,
            }
        })?;
        self.fs.write(&path, json.as_bytes())?;
        Ok(())
    }

    /// Current state of a deployment, `None` when it has no record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSkillName`] for unusable names and
    /// [`StoreError::InvalidRecord`] if the record cannot be decoded.
    pub fn status(&self, name: &str) -> Result<Option<DeploymentStatus>> {
        validate_skill_name(name)?;

        let deploy_path = self.deploy_path(name);
        let record_path = deploy_path.join(DEPLOYMENT_RECORD_FILE);
        if !self.fs.is_file(&record_path) {
            return Ok(None);
        }

        let text = self.fs.read_to_string(&record_path)?;
        let record: DeploymentRecord =
            serde_json::from_str(&text).map_err(|e| StoreError::InvalidRecord {
                path: record_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let files_exist: BTreeMap<String, bool> = record
            .resources
            .iter()
            .map(|resource| {
                (
                    resource.clone(),
                    self.fs.exists(&deploy_path.join(resource)),
                )
            })
            .collect();

        Ok(Some(DeploymentStatus {
            record,
            files_exist,
            deploy_path: deploy_path.display().to_string(),
        }))
    }

    /// Removes a deployment. Returns `false` if nothing was deployed.
    ///
    /// # Errors
    ///
    /// Returns an error for unusable names or if removal fails.
    pub fn undeploy(&self, name: &str) -> Result<bool> {
        validate_skill_name(name)?;

        let deploy_path = self.deploy_path(name);
        if !self.fs.exists(&deploy_path) {
            warn!("Skill is not deployed: {}", name);
            return Ok(false);
        }

        self.fs.remove_dir_all(&deploy_path)?;
        info!("Undeployed skill: {}", name);
        Ok(true)
    }

    /// Status of every deployment with a readable record, sorted by name.
    ///
    /// Unreadable records are logged and skipped.
    #[must_use]
    pub fn list_deployed(&self) -> Vec<DeploymentStatus> {
        let entries = match self.fs.list_dir(&self.deployed_dir) {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => return Vec::new(),
            Err(e) => {
                warn!("Failed to list {}: {}", self.deployed_dir.display(), e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| entry.is_dir)
            .filter_map(|entry| match self.status(&entry.name) {
                Ok(status) => status,
                Err(e) => {
                    error!("Failed to read deployment status {}: {}", entry.name, e);
                    None
                }
            })
            .collect()
    }

    /// Deploys every skill the scanner discovers.
    ///
    /// One skill's failure never stops the batch; it is itemized in the
    /// report instead.
    pub fn deploy_all<G: FileSystem>(&self, scanner: &Scanner<G>) -> DeployReport {
        let names = scanner.discover();
        info!("Deploying {} skills", names.len());

        let mut report = DeployReport {
            attempted: names.len(),
            ..DeployReport::default()
        };
        for name in &names {
            self.deploy_into_report(scanner, name, &mut report);
        }

        info!(
            "Deployment finished: {}/{} succeeded",
            report.succeeded, report.attempted
        );
        report
    }

    /// Deploys a single discovered skill.
    pub fn deploy_one<G: FileSystem>(&self, scanner: &Scanner<G>, name: &str) -> DeployReport {
        let mut report = DeployReport {
            attempted: 1,
            ..DeployReport::default()
        };

        if scanner.discover().iter().any(|found| found == name) {
            self.deploy_into_report(scanner, name, &mut report);
        } else {
            error!("Skill does not exist: {}", name);
            report.fail(
                name,
                StoreError::SkillNotFound {
                    skill_name: name.to_string(),
                },
            );
        }
        report
    }

    fn deploy_into_report<G: FileSystem>(
        &self,
        scanner: &Scanner<G>,
        name: &str,
        report: &mut DeployReport,
    ) {
        let skill = match scanner.load(name) {
            Ok(skill) => skill,
            Err(e) => {
                warn!("Skipping skill {}: {}", name, e);
                report.fail(name, e);
                return;
            }
        };

        for message in validate(&skill.descriptor).messages() {
            warn!("Skill {}: {}", name, message);
            report.warnings.push(DeployWarning {
                skill: name.to_string(),
                message,
            });
        }

        match self.deploy(&skill.path, &skill.descriptor) {
            Ok(record) => {
                report.succeeded += 1;
                report.deployed.push(record.skill_name);
            }
            Err(e) => {
                error!("Failed to deploy skill {}: {}", name, e);
                report.fail(name, e);
            }
        }
    }
}

fn render_usage_guide(
    name: &str,
    descriptor: &SkillDescriptor,
    deployed_at: DateTime<Utc>,
) -> String {
    let metadata = &descriptor.metadata;
    let title = metadata
        .text("name")
        .unwrap_or_else(|| "Unknown Skill".to_string());
    let description = metadata
        .text("description")
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let author = metadata
        .text("author")
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    format!(
        "# {title} Usage Guide

## Description
{description}

## Version
- Version: {version}
- Author: {author}
- Deployed at: {deployed}

## Skill Content
{content}

## How to Use

1. Install any dependencies the skill mentions
2. Follow the instructions in the skill content
3. Consult SKILL.md for details

## Files

```
{name}/
├── SKILL.md          # skill definition
├── deployment.json   # deployment record
└── [resources]       # copied resource directories
```
",
        version = metadata.version_or_default(),
        deployed = deployed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        content = descriptor.content,
    )
}
