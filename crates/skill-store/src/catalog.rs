//! Human-readable Markdown catalog of skills.

use crate::deployer::Deployer;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::types::{CatalogEntry, DEPLOYED_SOURCE};
use chrono::{DateTime, Utc};
use skill_deploy_files::FileSystem;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// Default location of the generated catalog.
pub const DEFAULT_CATALOG_PATH: &str = "docs/skill_list.md";

/// De-duplicated skills from the repository and the deployment directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Collects source skills (scanned recursively) and deployed skills.
    pub fn build<G: FileSystem, H: FileSystem>(
        scanner: &Scanner<G>,
        deployer: &Deployer<H>,
    ) -> Self {
        let mut entries = scanner.scan_recursive();
        let found = entries.len();

        entries.extend(deployer.list_deployed().into_iter().map(|status| {
            let path = Path::new(&status.deploy_path)
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            let mut entry = CatalogEntry::from_metadata(
                &status.record.metadata,
                &status.record.skill_name,
                path,
                DEPLOYED_SOURCE.to_string(),
            );
            entry.name.clone_from(&status.record.skill_name);
            entry.deployed_at = Some(status.record.deployed_at);
            entry
        }));

        let catalog = Self::from_entries(entries);
        info!(
            "Catalog: {} source skills, {} unique after merging deployments",
            found,
            catalog.len()
        );
        catalog
    }

    /// Builds a catalog, keeping one entry per name.
    ///
    /// The first entry for a name wins unless a later one is deployed, in
    /// which case the deployed entry replaces it in place.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut unique: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            match positions.get(&entry.name) {
                Some(&idx) => {
                    if entry.is_deployed() {
                        unique[idx] = entry;
                    }
                }
                None => {
                    positions.insert(entry.name.clone(), unique.len());
                    unique.push(entry);
                }
            }
        }

        Self { entries: unique }
    }

    /// Entries in collection order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of unique skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no skills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by category; categories and skills sorted.
    #[must_use]
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&CatalogEntry>> {
        let mut groups: BTreeMap<&str, Vec<&CatalogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        for skills in groups.values_mut() {
            skills.sort_by(|a, b| a.name.cmp(&b.name));
        }
        groups
    }

    /// Renders the catalog as Markdown.
    #[must_use]
    pub fn render(&self, generated_at: DateTime<Utc>) -> String {
        let groups = self.by_category();
        let mut out = String::new();

        out.push_str("# Skill Catalog\n\n## Overview\n\n");
        out.push_str(
            "This document lists every available skill with its description, \
             version, author and origin.\n\n",
        );
        out.push_str(&format!(
            "**Generated at**: {}  \n**Total skills**: {}  \n**Categories**: {}\n\n---\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.len(),
            groups.len()
        ));

        for (category, skills) in &groups {
            out.push_str(&format!("## {category}\n\n**Skills**: {}\n\n", skills.len()));
            for skill in skills {
                render_entry(&mut out, skill);
            }
        }

        out.push_str("## Statistics\n\n| Category | Skills |\n|----------|--------|\n");
        for (category, skills) in &groups {
            out.push_str(&format!("| {category} | {} |\n", skills.len()));
        }
        out.push_str(&format!("\n**Total**: {} skills\n", self.len()));

        out
    }

    /// Renders the catalog and writes it to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to<F: FileSystem>(
        &self,
        fs: &F,
        output: &Path,
        generated_at: DateTime<Utc>,
    ) -> Result<()> {
        fs.write(output, self.render(generated_at).as_bytes())?;
        info!("Wrote skill catalog to {}", output.display());
        Ok(())
    }
}

fn render_entry(out: &mut String, skill: &CatalogEntry) {
    out.push_str(&format!(
        "### {}\n\n**Description**: {}  \n**Version**: {}  \n**Author**: {}  \n**Source**: {}  \n**Path**: {}  \n",
        skill.name, skill.description, skill.version, skill.author, skill.source, skill.path
    ));
    if !skill.tags.is_empty() {
        out.push_str(&format!("**Tags**: {}  \n", skill.tags.join(", ")));
    }
    if let Some(deployed_at) = skill.deployed_at {
        out.push_str(&format!("**Deployed at**: {}  \n", deployed_at.to_rfc3339()));
    }
    out.push_str("\n---\n\n");
}
