//! Shared configuration, CLI types, and errors for skill deployment.
//!
//! Every other crate in the workspace depends on this one for
//! [`DeployConfig`] and the common file-name constants.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;

pub use config::{
    DEPLOYMENT_RECORD_FILE, DESCRIPTOR_FILE, DeployConfig, USAGE_FILE, default_config_path,
};
pub use error::{Error, Result};
