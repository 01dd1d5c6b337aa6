//! Command-line argument definitions.

use crate::actions::ConfigAction;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Deploy, inspect and catalog `SKILL.md` skills.
#[derive(Parser, Debug)]
#[command(name = "skill-deploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Path to the configuration file
    #[arg(long, global = true, env = "SKILL_DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source skill repository directory
    #[arg(long, global = true)]
    pub skills_dir: Option<PathBuf>,

    /// Directory deployed skills are copied into
    #[arg(long, global = true)]
    pub deployed_dir: Option<PathBuf>,

    /// Directory holding the skill index
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy skills from the source repository.
    ///
    /// Deploys every discovered skill, or a single one with `--skill`, and
    /// regenerates the skill index after a full run.
    Deploy {
        /// Deploy only this skill
        #[arg(long)]
        skill: Option<String>,

        /// Accepted for compatibility; existing deployments are always replaced
        #[arg(long)]
        force: bool,
    },

    /// List source skills with their deployment state.
    List {
        /// Show per-deployment details
        #[arg(long)]
        details: bool,
    },

    /// Regenerate the skill index from current deployments.
    Index,

    /// Write the Markdown skill catalog.
    Catalog {
        /// Output path of the catalog
        #[arg(short, long, default_value = skill_deploy_store::DEFAULT_CATALOG_PATH)]
        output: PathBuf,
    },

    /// Validate skill descriptors and show extracted commands.
    Validate {
        /// Validate only this skill (default: all discovered skills)
        name: Option<String>,
    },

    /// Show the deployment status of a skill.
    Status {
        /// Skill name
        name: String,
    },

    /// Remove a deployed skill.
    Undeploy {
        /// Skill name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_deploy_defaults() {
        let cli = Cli::parse_from(["skill-deploy", "deploy"]);
        assert!(!cli.verbose);
        assert_eq!(cli.format, "pretty");
        match cli.command {
            Commands::Deploy { skill, force } => {
                assert!(skill.is_none());
                assert!(!force);
            }
            _ => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_deploy_single_skill() {
        let cli = Cli::parse_from(["skill-deploy", "deploy", "--skill", "pdf", "--force"]);
        match cli.command {
            Commands::Deploy { skill, force } => {
                assert_eq!(skill.as_deref(), Some("pdf"));
                assert!(force);
            }
            _ => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "skill-deploy",
            "list",
            "--details",
            "--format",
            "json",
            "--skills-dir",
            "repo/skills",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.skills_dir, Some(PathBuf::from("repo/skills")));
        assert!(matches!(cli.command, Commands::List { details: true }));
    }

    #[test]
    fn test_catalog_default_output() {
        let cli = Cli::parse_from(["skill-deploy", "catalog"]);
        match cli.command {
            Commands::Catalog { output } => {
                assert_eq!(output, PathBuf::from("docs/skill_list.md"));
            }
            _ => panic!("expected catalog command"),
        }
    }

    #[test]
    fn test_validate_optional_name() {
        let cli = Cli::parse_from(["skill-deploy", "validate"]);
        assert!(matches!(cli.command, Commands::Validate { name: None }));

        let cli = Cli::parse_from(["skill-deploy", "validate", "pdf"]);
        assert!(matches!(cli.command, Commands::Validate { name: Some(n) } if n == "pdf"));
    }

    #[test]
    fn test_undeploy_requires_name() {
        assert!(Cli::try_parse_from(["skill-deploy", "undeploy"]).is_err());

        let cli = Cli::parse_from(["skill-deploy", "undeploy", "pdf", "--yes"]);
        assert!(matches!(cli.command, Commands::Undeploy { yes: true, .. }));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["skill-deploy", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));

        let cli = Cli::parse_from(["skill-deploy", "config", "path"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["skill-deploy", "completions", "zsh"]);
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }
}
