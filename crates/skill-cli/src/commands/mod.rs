//! Command implementations for the `skill-deploy` CLI.
//!
//! Each handler takes the resolved configuration and the output format,
//! prints its result, and returns the process exit code.

pub mod catalog;
pub mod common;
pub mod completions;
pub mod config;
pub mod deploy;
pub mod index;
pub mod list;
pub mod status;
pub mod undeploy;
pub mod validate;
