//! Configuration command
//!
//! Prints the configuration the hook would run with from the current
//! directory, after every layer has been applied.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use crate::config::{GuardConfig, Overrides};

pub fn execute(config_path: Option<&Path>, default_base: Option<String>) -> Result<ExitCode> {
    let config = GuardConfig::load_with(config_path, &Overrides { default_base })?;
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
