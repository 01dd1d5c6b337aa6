//! Command execution and logging initialization.

use anyhow::{Context, Result};
use clap::CommandFactory;
use skill_deploy_core::cli::{ExitCode, OutputFormat};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::common::ConfigOverrides;

/// Initializes logging.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` wins over the configured
/// level. Events always go to stderr, and additionally to `log_file` without
/// ANSI colors when one is given. Keep the returned guard alive until exit so
/// buffered file output is flushed.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: bool,
    configured_level: &str,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to initialize logging")?;

    Ok(guard)
}

/// Executes the specified CLI command.
///
/// Commands that touch skills resolve the configuration from `overrides`
/// first; `config` and `completions` work without a valid configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails in
/// a way that is not reported through its exit code.
pub fn execute_command(
    command: Commands,
    overrides: &ConfigOverrides,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Deploy { skill, force } => {
            let config = overrides.resolve()?;
            commands::deploy::run(&config, skill.as_deref(), force, output_format)
        }
        Commands::List { details } => {
            let config = overrides.resolve()?;
            commands::list::run(&config, details, output_format)
        }
        Commands::Index => {
            let config = overrides.resolve()?;
            commands::index::run(&config, output_format)
        }
        Commands::Catalog { output } => {
            let config = overrides.resolve()?;
            commands::catalog::run(&config, &output, output_format)
        }
        Commands::Validate { name } => {
            let config = overrides.resolve()?;
            commands::validate::run(&config, name.as_deref(), output_format)
        }
        Commands::Status { name } => {
            let config = overrides.resolve()?;
            commands::status::run(&config, &name, output_format)
        }
        Commands::Undeploy { name, yes } => {
            let config = overrides.resolve()?;
            commands::undeploy::run(&config, &name, yes, output_format)
        }
        Commands::Config { action } => commands::config::run(action, overrides, output_format),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            Ok(commands::completions::run(shell, &mut cmd))
        }
    }
}
