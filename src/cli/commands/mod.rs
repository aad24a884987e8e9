//! Command implementations for the submodule-guard CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod install;
pub mod uninstall;
pub mod update;
