//! Skill discovery in the source repository.

use crate::error::{Result, StoreError};
use crate::name::validate_skill_name;
use crate::types::{CatalogEntry, LoadedSkill};
use skill_deploy_core::{DESCRIPTOR_FILE, DeployConfig};
use skill_deploy_files::{FileSystem, to_slash};
use skill_deploy_parser::{decode_metadata, parse, split_header};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Finds and loads skills below a repository root.
///
/// A skill is an immediate subdirectory of the root holding a `SKILL.md`.
///
/// # Examples
///
/// ```
/// use skill_deploy_files::MemoryFs;
/// use skill_deploy_store::Scanner;
///
/// let fs = MemoryFs::new();
/// fs.add_file("skills/pdf/SKILL.md", "---\nname: pdf\ndescription: PDF tools\n---\n# PDF\n").unwrap();
/// fs.add_file("skills/pdf/scripts/merge.sh", "#!/bin/sh\n").unwrap();
/// fs.add_file("skills/notes/README.md", "not a skill").unwrap();
///
/// let scanner = Scanner::new(fs, "skills", vec!["scripts".to_string()]);
/// assert_eq!(scanner.discover(), vec!["pdf"]);
///
/// let skill = scanner.load("pdf").unwrap();
/// assert_eq!(skill.resources, vec!["scripts/merge.sh"]);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<F> {
    fs: F,
    skills_dir: PathBuf,
    resource_dirs: Vec<String>,
}

impl<F: FileSystem> Scanner<F> {
    /// Creates a scanner over `skills_dir`.
    pub fn new(fs: F, skills_dir: impl Into<PathBuf>, resource_dirs: Vec<String>) -> Self {
        Self {
            fs,
            skills_dir: skills_dir.into(),
            resource_dirs,
        }
    }

    /// Creates a scanner using the directories from `config`.
    #[must_use]
    pub fn from_config(fs: F, config: &DeployConfig) -> Self {
        Self::new(fs, config.skills_dir.clone(), config.resource_dirs.clone())
    }

    /// Repository root.
    #[must_use]
    pub fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    /// Directory of the named skill.
    #[must_use]
    pub fn skill_path(&self, name: &str) -> PathBuf {
        self.skills_dir.join(name)
    }

    /// Checks that the repository root exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SourceRootMissing`] if it does not.
    pub fn ensure_root(&self) -> Result<()> {
        if self.fs.is_dir(&self.skills_dir) {
            Ok(())
        } else {
            Err(StoreError::SourceRootMissing {
                path: self.skills_dir.display().to_string(),
            })
        }
    }

    /// Names of every skill directory, sorted.
    ///
    /// A missing or unreadable root yields an empty list.
    #[must_use]
    pub fn discover(&self) -> Vec<String> {
        if !self.fs.is_dir(&self.skills_dir) {
            warn!(
                "Skills directory does not exist: {}",
                self.skills_dir.display()
            );
            return Vec::new();
        }

        let entries = match self.fs.list_dir(&self.skills_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list {}: {}", self.skills_dir.display(), e);
                return Vec::new();
            }
        };

        let skills: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.is_dir && self.fs.is_file(&entry.path.join(DESCRIPTOR_FILE)))
            .map(|entry| {
                debug!("Discovered skill: {}", entry.name);
                entry.name
            })
            .collect();

        info!("Discovered {} skills", skills.len());
        skills
    }

    /// Reads and parses one skill.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSkillName`] for unusable names,
    /// [`StoreError::SkillNotFound`] when there is no `SKILL.md`, and
    /// [`StoreError::Parse`] when the descriptor is rejected.
    pub fn load(&self, name: &str) -> Result<LoadedSkill> {
        validate_skill_name(name)?;

        let path = self.skill_path(name);
        let file = path.join(DESCRIPTOR_FILE);
        if !self.fs.is_file(&file) {
            return Err(StoreError::SkillNotFound {
                skill_name: name.to_string(),
            });
        }

        let text = self.fs.read_to_string(&file)?;
        let descriptor = parse(&text, &file.display().to_string())?;
        let resources = self.resources(&path)?;

        debug!("Loaded skill {} with {} resources", name, resources.len());

        Ok(LoadedSkill {
            name: name.to_string(),
            path,
            descriptor,
            resources,
        })
    }

    fn resources(&self, skill_path: &Path) -> Result<Vec<String>> {
        let mut resources = Vec::new();
        for dir in &self.resource_dirs {
            let resource_root = skill_path.join(dir);
            if !self.fs.is_dir(&resource_root) {
                continue;
            }
            for relative in self.fs.walk_files(&resource_root)? {
                resources.push(to_slash(&Path::new(dir).join(relative)));
            }
        }
        resources.sort();
        Ok(resources)
    }

    /// Every `SKILL.md` at any depth below the root, decoded leniently.
    ///
    /// Only the header is decoded; missing fields fall back to catalog
    /// defaults instead of failing. Files that cannot be decoded at all
    /// are logged and skipped.
    #[must_use]
    pub fn scan_recursive(&self) -> Vec<CatalogEntry> {
        if !self.fs.is_dir(&self.skills_dir) {
            return Vec::new();
        }

        let files = match self.fs.walk_files(&self.skills_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to scan {}: {}", self.skills_dir.display(), e);
                return Vec::new();
            }
        };

        files
            .iter()
            .filter(|relative| relative.file_name().is_some_and(|n| n == DESCRIPTOR_FILE))
            .filter_map(|relative| self.lenient_entry(relative))
            .collect()
    }

    fn lenient_entry(&self, relative: &Path) -> Option<CatalogEntry> {
        let file = self.skills_dir.join(relative);
        let origin = file.display().to_string();

        let decoded = self.fs.read_to_string(&file).map_err(StoreError::from).and_then(|text| {
            let (header, _) = split_header(&text, &origin)?;
            Ok(decode_metadata(header, &origin)?)
        });

        let metadata = match decoded {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Skipping {}: {}", origin, e);
                return None;
            }
        };

        let skill_dir = relative.parent().unwrap_or_else(|| Path::new(""));
        let dir_path = to_slash(skill_dir);
        let fallback_name = skill_dir
            .file_name()
            .or_else(|| self.skills_dir.file_name())
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

        Some(CatalogEntry::from_metadata(
            &metadata,
            &fallback_name,
            if dir_path.is_empty() {
                ".".to_string()
            } else {
                dir_path
            },
            self.skills_dir.display().to_string(),
        ))
    }
}
