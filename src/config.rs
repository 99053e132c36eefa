use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::identifier::IdentifierOptions;

/// Registry used when an identifier does not name one
pub const DEFAULT_REGISTRY: &str = "https://registry.crucible.net";

/// Namespace used when an identifier is a bare name
pub const DEFAULT_NAMESPACE: &str = "official";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid identifier defaults: {0}")]
    Defaults(#[from] crate::error::Error),
}

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Registry URL for default-form identifiers (`namespace/name`)
    pub default_registry: String,
    /// Namespace for bare names
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_registry: DEFAULT_REGISTRY.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(config.fill_blanks())
    }

    /// Load the config file from the standard location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&config_path())
    }

    /// Apply command line overrides on top of the file values
    pub fn with_overrides(mut self, registry: Option<String>, namespace: Option<String>) -> Self {
        if let Some(registry) = registry {
            self.default_registry = registry;
        }
        if let Some(namespace) = namespace {
            self.default_namespace = namespace;
        }
        self
    }

    /// Identifier defaults built from this configuration
    pub fn identifier_options(&self) -> Result<IdentifierOptions, ConfigError> {
        Ok(IdentifierOptions::new(
            &self.default_registry,
            &self.default_namespace,
        )?)
    }

    fn fill_blanks(mut self) -> Self {
        if self.default_registry.trim().is_empty() {
            warn!("Empty defaultRegistry in config, using {}", DEFAULT_REGISTRY);
            self.default_registry = DEFAULT_REGISTRY.to_string();
        }
        if self.default_namespace.trim().is_empty() {
            warn!("Empty defaultNamespace in config, using {}", DEFAULT_NAMESPACE);
            self.default_namespace = DEFAULT_NAMESPACE.to_string();
        }
        self
    }
}

/// Returns the path to the config directory for crucible-ref.
/// Uses $XDG_CONFIG_HOME/crucible-ref if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/crucible-ref,
/// or ./crucible-ref if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("crucible-ref")
}
