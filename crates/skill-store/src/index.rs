//! Machine-readable index of deployed skills.

use crate::deployer::Deployer;
use crate::error::{Result, StoreError};
use crate::types::{IndexEntry, SkillIndex};
use chrono::Utc;
use skill_deploy_core::DeployConfig;
use skill_deploy_files::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `skill_index.json` from the current deployments.
#[derive(Debug, Clone)]
pub struct IndexGenerator<F> {
    fs: F,
    index_path: PathBuf,
}

impl<F: FileSystem> IndexGenerator<F> {
    /// Creates a generator writing to the index path from `config`.
    #[must_use]
    pub fn new(fs: F, config: &DeployConfig) -> Self {
        Self {
            fs,
            index_path: config.index_path(),
        }
    }

    /// Location of the index file.
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Builds the index from every readable deployment and writes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be serialized or written.
    pub fn generate<G: FileSystem>(&self, deployer: &Deployer<G>) -> Result<SkillIndex> {
        let index = build_index(deployer);

        let json = serde_json::to_string_pretty(&index).map_err(|source| {
            StoreError::Serialize {
                path: self.index_path.display().to_string(),
                source,
            }
        })?;
        self.fs.write(&self.index_path, json.as_bytes())?;

        info!(
            "Wrote index of {} skills to {}",
            index.total_skills,
            self.index_path.display()
        );
        Ok(index)
    }

    /// Reads a previously written index, `None` if there is none yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] if the file cannot be decoded.
    pub fn load(&self) -> Result<Option<SkillIndex>> {
        if !self.fs.is_file(&self.index_path) {
            return Ok(None);
        }
        let text = self.fs.read_to_string(&self.index_path)?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::InvalidRecord {
                path: self.index_path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

fn build_index<G: FileSystem>(deployer: &Deployer<G>) -> SkillIndex {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    let skills: Vec<IndexEntry> = deployer
        .list_deployed()
        .into_iter()
        .map(|status| {
            *categories.entry(status.record.category()).or_default() += 1;
            IndexEntry {
                name: status.record.skill_name,
                metadata: status.record.metadata,
                deployed_at: status.record.deployed_at,
                files_exist: status.files_exist,
            }
        })
        .collect();

    SkillIndex {
        total_skills: skills.len(),
        skills,
        categories,
        last_updated: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_deploy_files::MemoryFs;
    use skill_deploy_parser::parse;

    fn deploy(fs: &MemoryFs, deployer: &Deployer<MemoryFs>, name: &str, category: Option<&str>) {
        let category = category.map_or_else(String::new, |c| format!("category: {c}\n"));
        let text = format!("---\nname: {name}\ndescription: d\n{category}---\n# H\n");
        let dir = format!("skills/{name}");
        fs.add_file(format!("{dir}/SKILL.md"), &text).unwrap();
        deployer
            .deploy(Path::new(&dir), &parse(&text, "t").unwrap())
            .unwrap();
    }

    #[test]
    fn test_generate_counts_categories() {
        let fs = MemoryFs::new();
        let config = DeployConfig::default();
        let deployer = Deployer::new(fs.clone(), &config).unwrap();
        deploy(&fs, &deployer, "a", Some("docs"));
        deploy(&fs, &deployer, "b", Some("docs"));
        deploy(&fs, &deployer, "c", None);

        let generator = IndexGenerator::new(fs.clone(), &config);
        let index = generator.generate(&deployer).unwrap();

        assert_eq!(index.total_skills, 3);
        assert_eq!(index.categories.get("docs"), Some(&2));
        assert_eq!(index.categories.get("uncategorized"), Some(&1));
        assert_eq!(index.skills[0].name, "a");
        assert_eq!(index.skills[0].files_exist.get("SKILL.md"), Some(&true));

        let stored = generator.load().unwrap().unwrap();
        assert_eq!(stored, index);
        assert!(fs.is_file(Path::new("config/skill_index.json")));
    }

    #[test]
    fn test_generate_empty() {
        let fs = MemoryFs::new();
        let config = DeployConfig::default();
        let deployer = Deployer::new(fs.clone(), &config).unwrap();
        let generator = IndexGenerator::new(fs, &config);

        assert!(generator.load().unwrap().is_none());
        let index = generator.generate(&deployer).unwrap();
        assert_eq!(index.total_skills, 0);
        assert!(index.categories.is_empty());
    }
}
