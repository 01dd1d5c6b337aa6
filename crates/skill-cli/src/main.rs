//! `skill-deploy` command-line entry point.
//!
//! ```bash
//! # Deploy every skill under ./skills into ./deployed_skills
//! skill-deploy deploy
//!
//! # Deploy one skill and log to a file
//! skill-deploy deploy --skill pdf --log-file skill_deployment.log
//!
//! # Check what is deployed
//! skill-deploy list --details
//! skill-deploy status pdf --format json
//!
//! # Regenerate the Markdown catalog
//! skill-deploy catalog --output docs/skill_list.md
//! ```

use anyhow::Result;
use clap::Parser;
use skill_deploy_cli::cli::Cli;
use skill_deploy_cli::commands::common::ConfigOverrides;
use skill_deploy_cli::runner::{execute_command, init_logging};
use skill_deploy_core::cli::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        config_path: cli.config,
        skills_dir: cli.skills_dir,
        deployed_dir: cli.deployed_dir,
        config_dir: cli.config_dir,
    };

    // An unreadable config is reported by the command itself
    let level = overrides
        .resolve()
        .map_or_else(|_| "info".to_string(), |config| config.log_level);
    let log_guard = init_logging(cli.verbose, &level, cli.log_file.as_deref())?;

    let output_format = cli.format.parse::<OutputFormat>()?;

    let exit_code = execute_command(cli.command, &overrides, output_format)?;

    drop(log_guard);
    std::process::exit(exit_code.as_i32());
}
