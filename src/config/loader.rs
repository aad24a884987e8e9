use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;

use super::{GuardConfig, Overrides};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Per-repository config file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "submodule-guard.toml";

/// Prefix for environment overrides, e.g. `SUBMODULE_GUARD_DEFAULT_BASE`
pub const ENV_PREFIX: &str = "SUBMODULE_GUARD_";

impl GuardConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, &Overrides::default())
    }

    pub fn load_with(custom_config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::figment(custom_config, overrides)
            .extract()
            .context("Failed to load configuration")
    }

    fn figment(custom_config: Option<&Path>, overrides: &Overrides) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // An explicit file must exist; the per-repository one is optional
        // and never searched for in parent directories.
        let repo_config = Path::new(CONFIG_FILE_NAME);
        figment = match custom_config {
            Some(path) => figment.merge(Toml::file_exact(path)),
            None if repo_config.is_file() => figment.merge(Toml::file_exact(repo_config)),
            None => figment,
        };

        // Environment variables override files, command line overrides everything
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// The configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
