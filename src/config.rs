//! Router configuration, read from TOML.
//!
//! ```toml
//! primary = "core"
//!
//! [providers.database]
//! enabled = false
//! install_hint = "ask ops to enable the database bundle"
//!
//! [logging]
//! level = "debug"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RouterError;
use crate::providers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Provider whose symbols back the legacy namespace
    pub primary: String,
    pub providers: BTreeMap<String, ProviderSettings>,
    pub logging: LoggingConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            primary: providers::primary::ID.to_string(),
            providers: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// `false` treats the provider as not installed
    pub enabled: bool,
    /// Replaces the bundled install hint
    pub install_hint: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            install_hint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, RouterError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, RouterError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(RouterError::Config(format!(
                "cannot read {}: {err}",
                path.display()
            ))),
        }
    }

    /// `~/.config/capability-router/config.toml`
    pub fn default_path() -> Result<PathBuf, RouterError> {
        let home = dirs::home_dir()
            .ok_or_else(|| RouterError::Config("missing home directory".to_string()))?;
        Ok(home
            .join(".config")
            .join("capability-router")
            .join("config.toml"))
    }
}
