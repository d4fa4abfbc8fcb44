//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. The user config file
//!
//! # Config Locations
//!
//! Searched in order, first hit wins:
//! 1. An explicit path (`--config`), which must exist
//! 2. `$CORRAL_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/corral/config.toml`
//! 4. `~/.corral/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use corral::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! for backend in config.backends() {
//!     println!("{} -> {}", backend.id, backend.command);
//! }
//! println!("noisy: {}", config.noisy());
//! ```

pub mod schema;

pub use schema::{BackendSpec, CorralConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Validated configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw file contents (defaults if no file was found)
    pub file: CorralConfig,
    backends: Vec<BackendSpec>,
    loaded_from: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let backends = schema::DEFAULT_ENABLED_VCS
            .iter()
            .filter_map(|name| {
                Some(BackendSpec {
                    id: crate::core::types::BackendId::new(*name).ok()?,
                    command: schema::builtin_command(name)?.to_string(),
                })
            })
            .collect();
        Self {
            file: CorralConfig::default(),
            backends,
            loaded_from: None,
        }
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path is missing, or if a config file
    /// exists but cannot be parsed or fails validation. A missing file at a
    /// default location is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        match Self::locate(explicit)? {
            Some(path) => Self::load_from_path(&path),
            None => Ok(ConfigLoadResult {
                config: Config::default(),
                warnings: Vec::new(),
            }),
        }
    }

    /// Load and validate a specific config file.
    pub fn load_from_path(path: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: CorralConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let warnings = file
            .unused_commands()
            .into_iter()
            .map(|id| ConfigWarning {
                message: format!(
                    "vcs_command has an entry for '{}' but it is not in enabled_vcs",
                    id
                ),
                path: path.to_path_buf(),
            })
            .collect();

        Ok(ConfigLoadResult {
            config: Self::from_file(file, Some(path.to_path_buf()))?,
            warnings,
        })
    }

    /// Build a config from parsed file contents.
    pub fn from_file(
        file: CorralConfig,
        loaded_from: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let backends = file.resolve_backends()?;
        Ok(Self {
            file,
            backends,
            loaded_from,
        })
    }

    /// Find the config file to load, if any.
    fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "config file does not exist",
                    ),
                });
            }
            return Ok(Some(path.to_path_buf()));
        }

        if let Ok(path) = std::env::var("CORRAL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("corral/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".corral/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Enabled backends with their commands, in priority order.
    pub fn backends(&self) -> &[BackendSpec] {
        &self.backends
    }

    /// Whether notifications are clipped to the window width.
    ///
    /// Defaults to `true` if not configured.
    pub fn truncate(&self) -> bool {
        self.file.truncate.unwrap_or(true)
    }

    /// Whether informational notifications are shown.
    ///
    /// Defaults to `true` if not configured.
    pub fn noisy(&self) -> bool {
        self.file.noisy.unwrap_or(true)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Render the effective configuration as TOML.
    pub fn to_effective_toml(&self) -> Result<String, ConfigError> {
        let effective = CorralConfig {
            enabled_vcs: Some(self.backends.iter().map(|b| b.id.to_string()).collect()),
            vcs_command: self
                .backends
                .iter()
                .map(|b| (b.id.to_string(), b.command.clone()))
                .collect(),
            truncate: Some(self.truncate()),
            noisy: Some(self.noisy()),
        };
        toml::to_string_pretty(&effective).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        let ids: Vec<&str> = config.backends().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["git", "svn"]);
        assert!(config.truncate());
        assert!(config.noisy());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            enabled_vcs = ["hg", "git"]
            noisy = false
            "#,
        )
        .unwrap();

        let result = Config::load(Some(&path)).unwrap();
        let config = result.config;

        let ids: Vec<&str> = config.backends().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["hg", "git"]);
        assert!(!config.noisy());
        assert!(config.truncate());
        assert_eq!(config.loaded_from(), Some(path.as_path()));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_explicit_path_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "enabled_vcs = [").unwrap();

        match Config::load_from_path(&path) {
            Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn validation_error_surfaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "enabled_vcs = [\"darcs\"]").unwrap();

        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn unused_command_warns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [vcs_command]
            hg = "hg root"
            "#,
        )
        .unwrap();

        let result = Config::load_from_path(&path).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("'hg'"));
    }

    #[test]
    fn effective_toml_roundtrips() {
        let config = Config::default();
        let rendered = config.to_effective_toml().unwrap();
        let parsed: CorralConfig = toml::from_str(&rendered).unwrap();
        let reparsed = Config::from_file(parsed, None).unwrap();
        assert_eq!(reparsed.backends(), config.backends());
    }
}
