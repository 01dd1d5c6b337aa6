//! Library half of the `skill-deploy` binary.
//!
//! Argument definitions, command handlers and output formatters live here so
//! they can be exercised from tests without spawning a process.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use actions::ConfigAction;
