//! Shell completion generation command.

use clap::Command;
use clap_complete::{Shell, generate};
use skill_deploy_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
#[must_use]
pub fn run(shell: Shell, cmd: &mut Command) -> ExitCode {
    info!("Generating {} completions", shell);
    write_completions(shell, cmd, &mut io::stdout());
    ExitCode::SUCCESS
}
