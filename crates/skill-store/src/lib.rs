//! Skill discovery, deployment, and reporting.
//!
//! The pieces follow the flow of a deployment run:
//!
//! 1. [`Scanner`] finds skill directories and parses their `SKILL.md`
//! 2. [`Deployer`] copies each skill and writes a `deployment.json` record
//! 3. [`IndexGenerator`] aggregates the records into `skill_index.json`
//! 4. [`Catalog`] renders a Markdown overview of source and deployed skills
//!
//! Every component is generic over [`FileSystem`](skill_deploy_files::FileSystem)
//! and receives its directories from a
//! [`DeployConfig`](skill_deploy_core::DeployConfig) at construction.
//!
//! # Examples
//!
//! ```
//! use skill_deploy_core::DeployConfig;
//! use skill_deploy_files::MemoryFs;
//! use skill_deploy_store::{Deployer, IndexGenerator, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFs::new();
//! fs.add_file(
//!     "skills/pdf/SKILL.md",
//!     "---\nname: pdf\ndescription: PDF tools\ncategory: documents\n---\n# PDF\n",
//! )?;
//!
//! let config = DeployConfig::default();
//! let scanner = Scanner::from_config(fs.clone(), &config);
//! let deployer = Deployer::new(fs.clone(), &config)?;
//!
//! let report = deployer.deploy_all(&scanner);
//! assert_eq!(report.succeeded, 1);
//!
//! let index = IndexGenerator::new(fs, &config).generate(&deployer)?;
//! assert_eq!(index.categories.get("documents"), Some(&1));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod catalog;
mod deployer;
mod error;
mod index;
mod name;
mod scanner;
mod types;

pub use catalog::{Catalog, DEFAULT_CATALOG_PATH};
pub use deployer::Deployer;
pub use error::{Result, StoreError};
pub use index::IndexGenerator;
pub use name::validate_skill_name;
pub use scanner::Scanner;
pub use types::{
    CatalogEntry, DEFAULT_AUTHOR, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, DEPLOYED_SOURCE,
    DeployFailure, DeployReport, DeployWarning, DeploymentRecord, DeploymentStatus, IndexEntry,
    LoadedSkill, SkillIndex,
};
