//! Engine configuration loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_config.toml")`; a user
//! file only needs the keys it wants to override.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KulitanConfig {
    /// JSON array of character entries.
    pub characters_path: Option<PathBuf>,
    /// TOML file with a `patterns = [...]` list.
    pub patterns_path: Option<PathBuf>,
    /// JSON array of lexicon words.
    pub words_path: Option<PathBuf>,
    /// Compiled table snapshot; takes precedence over the three paths above
    /// when the file exists.
    pub snapshot_path: Option<PathBuf>,
    pub cache_capacity: usize,
    pub log_filter: String,
}

impl Default for KulitanConfig {
    fn default() -> Self {
        Self {
            characters_path: None,
            patterns_path: None,
            words_path: None,
            snapshot_path: None,
            cache_capacity: 256,
            log_filter: "kulitan_core=info".to_string(),
        }
    }
}

impl KulitanConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// The embedded defaults.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the embedded defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }
}
