//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: backend ids must be valid
//! [`BackendId`]s, may not repeat, and every enabled backend needs a
//! non-empty command (either built in or configured).

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BackendId;

/// Commands known without any configuration.
///
/// Each prints the repository root on stdout and exits non-zero outside a
/// repository.
pub const BUILTIN_COMMANDS: &[(&str, &str)] = &[
    ("git", "git rev-parse --show-toplevel"),
    ("svn", "svn info --show-item wc-root"),
    ("hg", "hg root"),
];

/// Backends tried when `enabled_vcs` is not configured, in priority order.
pub const DEFAULT_ENABLED_VCS: &[&str] = &["git", "svn"];

/// Look up the built-in command for a backend.
pub fn builtin_command(id: &str) -> Option<&'static str> {
    BUILTIN_COMMANDS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, command)| *command)
}

/// User configuration file.
///
/// # Example
///
/// ```toml
/// enabled_vcs = ["git", "hg"]
/// truncate = true
/// noisy = false
///
/// [vcs_command]
/// hg = "hg root --cwd ."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CorralConfig {
    /// Backends to try, in priority order
    pub enabled_vcs: Option<Vec<String>>,

    /// Per-backend root command overrides
    pub vcs_command: BTreeMap<String, String>,

    /// Clip notifications to the window width
    pub truncate: Option<bool>,

    /// Show informational notifications
    pub noisy: Option<bool>,
}

/// A backend with its resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSpec {
    pub id: BackendId,
    pub command: String,
}

impl CorralConfig {
    /// Validate the configuration and resolve the enabled backends.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn resolve_backends(&self) -> Result<Vec<BackendSpec>, ConfigError> {
        for (id, command) in &self.vcs_command {
            BackendId::new(id.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("vcs_command: {}", e)))?;
            if command.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "vcs_command for '{}' cannot be empty",
                    id
                )));
            }
        }

        let enabled: Vec<&str> = match &self.enabled_vcs {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => DEFAULT_ENABLED_VCS.to_vec(),
        };

        let mut seen = HashSet::new();
        let mut specs = Vec::with_capacity(enabled.len());
        for name in enabled {
            let id = BackendId::new(name)
                .map_err(|e| ConfigError::InvalidValue(format!("enabled_vcs: {}", e)))?;
            if !seen.insert(id.clone()) {
                return Err(ConfigError::InvalidValue(format!(
                    "enabled_vcs lists '{}' more than once",
                    id
                )));
            }

            let command = self
                .vcs_command
                .get(name)
                .map(|c| c.trim().to_string())
                .or_else(|| builtin_command(name).map(str::to_string))
                .ok_or_else(|| {
                    ConfigError::InvalidValue(format!(
                        "no command configured for backend '{}'; add it under [vcs_command]",
                        id
                    ))
                })?;

            specs.push(BackendSpec { id, command });
        }

        Ok(specs)
    }

    /// Backends that have a command override but are not enabled.
    pub fn unused_commands(&self) -> Vec<&str> {
        let enabled: Vec<&str> = match &self.enabled_vcs {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => DEFAULT_ENABLED_VCS.to_vec(),
        };
        self.vcs_command
            .keys()
            .map(String::as_str)
            .filter(|id| !enabled.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(specs: &[BackendSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn defaults_resolve_git_then_svn() {
        let specs = CorralConfig::default().resolve_backends().unwrap();
        assert_eq!(ids(&specs), vec!["git", "svn"]);
        assert_eq!(specs[0].command, "git rev-parse --show-toplevel");
        assert_eq!(specs[1].command, "svn info --show-item wc-root");
    }

    #[test]
    fn order_follows_enabled_vcs() {
        let config = CorralConfig {
            enabled_vcs: Some(vec!["svn".into(), "git".into()]),
            ..Default::default()
        };
        let specs = config.resolve_backends().unwrap();
        assert_eq!(ids(&specs), vec!["svn", "git"]);
    }

    #[test]
    fn builtin_hg_available() {
        let config = CorralConfig {
            enabled_vcs: Some(vec!["hg".into()]),
            ..Default::default()
        };
        let specs = config.resolve_backends().unwrap();
        assert_eq!(specs[0].command, "hg root");
    }

    #[test]
    fn override_replaces_builtin() {
        let mut vcs_command = BTreeMap::new();
        vcs_command.insert("git".to_string(), "  git rev-parse --show-superproject-working-tree ".to_string());
        let config = CorralConfig {
            vcs_command,
            ..Default::default()
        };
        let specs = config.resolve_backends().unwrap();
        assert_eq!(
            specs[0].command,
            "git rev-parse --show-superproject-working-tree"
        );
    }

    #[test]
    fn unknown_backend_without_command_rejected() {
        let config = CorralConfig {
            enabled_vcs: Some(vec!["fossil".into()]),
            ..Default::default()
        };
        assert!(config.resolve_backends().is_err());
    }

    #[test]
    fn unknown_backend_with_command_accepted() {
        let mut vcs_command = BTreeMap::new();
        vcs_command.insert("fossil".to_string(), "fossil info | sed -n 's/^local-root: *//p'".to_string());
        let config = CorralConfig {
            enabled_vcs: Some(vec!["fossil".into()]),
            vcs_command,
            ..Default::default()
        };
        assert!(config.resolve_backends().is_ok());
    }

    #[test]
    fn duplicate_backend_rejected() {
        let config = CorralConfig {
            enabled_vcs: Some(vec!["git".into(), "git".into()]),
            ..Default::default()
        };
        assert!(config.resolve_backends().is_err());
    }

    #[test]
    fn empty_command_rejected() {
        let mut vcs_command = BTreeMap::new();
        vcs_command.insert("git".to_string(), "   ".to_string());
        let config = CorralConfig {
            vcs_command,
            ..Default::default()
        };
        assert!(config.resolve_backends().is_err());
    }

    #[test]
    fn invalid_id_rejected() {
        let config = CorralConfig {
            enabled_vcs: Some(vec!["git svn".into()]),
            ..Default::default()
        };
        assert!(config.resolve_backends().is_err());
    }

    #[test]
    fn empty_enabled_list_is_allowed() {
        let config = CorralConfig {
            enabled_vcs: Some(vec![]),
            ..Default::default()
        };
        assert!(config.resolve_backends().unwrap().is_empty());
    }

    #[test]
    fn unused_commands_reported() {
        let mut vcs_command = BTreeMap::new();
        vcs_command.insert("hg".to_string(), "hg root".to_string());
        let config = CorralConfig {
            vcs_command,
            ..Default::default()
        };
        assert_eq!(config.unused_commands(), vec!["hg"]);
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            enabled_vcs = ["git"]
            unknown_field = true
        "#;

        let result: Result<CorralConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn parse_full_file() {
        let toml = r#"
            enabled_vcs = ["git", "hg"]
            truncate = false
            noisy = false

            [vcs_command]
            hg = "hg root"
        "#;

        let config: CorralConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.truncate, Some(false));
        assert_eq!(config.noisy, Some(false));
        assert_eq!(config.vcs_command.get("hg").map(String::as_str), Some("hg root"));
    }
}
