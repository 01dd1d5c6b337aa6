//! Records produced by scanning and deployment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skill_deploy_parser::{SkillDescriptor, SkillMetadata};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Category used when a skill declares none.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Author shown when a skill declares none.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Description shown when a skill declares none.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Source label of catalog entries built from deployment records.
pub const DEPLOYED_SOURCE: &str = "deployed";

/// A skill read from the source repository.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSkill {
    /// Directory name of the skill
    pub name: String,
    /// Skill directory
    pub path: PathBuf,
    /// Parsed `SKILL.md`
    pub descriptor: SkillDescriptor,
    /// Files under the resource directories, relative to `path`, sorted
    pub resources: Vec<String>,
}

/// Contents of `deployment.json`.
///
/// # Examples
///
/// ```
/// use skill_deploy_store::DeploymentRecord;
///
/// let json = r#"{
///   "skill_name": "pdf",
///   "metadata": {"name": "pdf", "description": "PDF tools"},
///   "deployed_at": "2026-01-02T03:04:05Z",
///   "source": "skills/pdf/SKILL.md",
///   "resources": ["SKILL.md", "scripts/merge.sh"]
/// }"#;
///
/// let record: DeploymentRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.skill_name, "pdf");
/// assert_eq!(record.resources.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Name of the deployed skill
    pub skill_name: String,
    /// Full decoded header of the deployed descriptor
    #[serde(default)]
    pub metadata: SkillMetadata,
    /// When the deployment was written
    pub deployed_at: DateTime<Utc>,
    /// Source label of the descriptor
    #[serde(default)]
    pub source: String,
    /// Deployed files relative to the deployment directory, sorted
    #[serde(default)]
    pub resources: Vec<String>,
}

impl DeploymentRecord {
    /// Declared category or [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category(&self) -> String {
        self.metadata
            .text("category")
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
    }
}

/// A deployment record plus a fresh file check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    /// Stored record
    #[serde(flatten)]
    pub record: DeploymentRecord,
    /// Whether each recorded resource still exists
    pub files_exist: BTreeMap<String, bool>,
    /// Deployment directory
    pub deploy_path: String,
}

impl DeploymentStatus {
    /// Returns `true` if every recorded resource is still present.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        self.files_exist.values().all(|exists| *exists)
    }

    /// Recorded resources that are gone.
    #[must_use]
    pub fn missing_files(&self) -> Vec<&str> {
        self.files_exist
            .iter()
            .filter(|(_, exists)| !**exists)
            .map(|(path, _)| path.as_str())
            .collect()
    }
}

/// One skill in the generated index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Skill name
    pub name: String,
    /// Full header mapping
    pub metadata: SkillMetadata,
    /// When the skill was deployed
    pub deployed_at: DateTime<Utc>,
    /// Resource presence at generation time
    pub files_exist: BTreeMap<String, bool>,
}

/// Machine-readable summary of every deployed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillIndex {
    /// Number of entries in `skills`
    pub total_skills: usize,
    /// Deployed skills sorted by name
    pub skills: Vec<IndexEntry>,
    /// Skill count per category
    pub categories: BTreeMap<String, usize>,
    /// When the index was generated
    pub last_updated: DateTime<Utc>,
}

/// One skill as listed in the Markdown catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Skill name
    pub name: String,
    /// Description or [`DEFAULT_DESCRIPTION`]
    pub description: String,
    /// Version or `1.0.0`
    pub version: String,
    /// Author or [`DEFAULT_AUTHOR`]
    pub author: String,
    /// Category or [`DEFAULT_CATEGORY`]
    pub category: String,
    /// Declared tags
    pub tags: Vec<String>,
    /// Skill directory relative to its root
    pub path: String,
    /// Root the entry came from, or [`DEPLOYED_SOURCE`]
    pub source: String,
    /// Deployment time for deployed entries
    pub deployed_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Builds an entry from a decoded header, applying catalog defaults.
    #[must_use]
    pub fn from_metadata(
        metadata: &SkillMetadata,
        fallback_name: &str,
        path: String,
        source: String,
    ) -> Self {
        Self {
            name: metadata
                .text("name")
                .unwrap_or_else(|| fallback_name.to_string()),
            description: metadata
                .text("description")
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            version: metadata.version_or_default(),
            author: metadata
                .text("author")
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            category: metadata
                .text("category")
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: metadata.tags(),
            path,
            source,
            deployed_at: None,
        }
    }

    /// Returns `true` if the entry came from a deployment record.
    #[must_use]
    pub fn is_deployed(&self) -> bool {
        self.source == DEPLOYED_SOURCE
    }
}

/// A skill that could not be deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployFailure {
    /// Skill directory name
    pub skill: String,
    /// What went wrong
    pub reason: String,
}

/// A non-blocking diagnostic raised while deploying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployWarning {
    /// Skill directory name
    pub skill: String,
    /// Diagnostic text
    pub message: String,
}

/// Outcome of a deployment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployReport {
    /// Skills the run tried to deploy
    pub attempted: usize,
    /// Skills deployed successfully
    pub succeeded: usize,
    /// Names of deployed skills, in deployment order
    pub deployed: Vec<String>,
    /// Itemized failures
    pub failures: Vec<DeployFailure>,
    /// Validation warnings for deployed skills
    pub warnings: Vec<DeployWarning>,
}

impl DeployReport {
    /// Returns `true` if at least one skill was deployed.
    #[must_use]
    pub const fn any_succeeded(&self) -> bool {
        self.succeeded > 0
    }

    /// Records a failure.
    pub fn fail(&mut self, skill: &str, reason: impl ToString) {
        self.failures.push(DeployFailure {
            skill: skill.to_string(),
            reason: reason.to_string(),
        });
    }
}
