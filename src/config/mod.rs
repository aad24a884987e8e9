//! Configuration management for submodule-guard
//!
//! Settings are layered with figment: the embedded `default-config.toml`,
//! then a TOML file (`--config` or `submodule-guard.toml` in the working
//! directory, which is the git directory when git runs the hook), then
//! `SUBMODULE_GUARD_*` environment variables, then command-line overrides.

mod loader;

pub use loader::{CONFIG_FILE_NAME, ENV_PREFIX};

use serde::{Deserialize, Serialize};

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Base revision compared against when a push creates a new ref
    pub default_base: String,

    /// How the repository is read
    pub backend: Backend,

    /// git executable for the `cli` backend
    pub git: String,
}

/// Repository access backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run the `git` executable
    Cli,
    /// Read the repository in-process with libgit2
    Libgit2,
}

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_base: Option<String>,
}
