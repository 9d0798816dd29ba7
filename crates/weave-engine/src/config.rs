//! Engine configuration
//!
//! Active environment tags are deployment input, not code: they come from a
//! `weave.toml` file merged with `WEAVE_`-prefixed environment variables.

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use weave_domain::{Error, Result};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "weave.toml";

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Active environment tags recorded at engine startup
    pub environments: Vec<String>,
}

impl EngineConfig {
    /// Load from `weave.toml` merged with `WEAVE_`-prefixed env vars
    ///
    /// A missing file is not an error; the env layer still applies and the
    /// defaults fill the rest.
    pub fn load() -> Result<Self> {
        Self::extract(
            Figment::new()
                .merge(Toml::file(DEFAULT_CONFIG_FILE))
                .merge(Env::prefixed("WEAVE_")),
        )
    }

    /// Load from an explicit file path merged with `WEAVE_`-prefixed env vars
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::extract(
            Figment::new()
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed("WEAVE_")),
        )
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| Error::configuration(e.to_string()))
    }
}
