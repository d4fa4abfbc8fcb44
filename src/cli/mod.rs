//! cli
//!
//! Command-line interface layer for corral.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging and load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers build backends and hosts from the loaded
//! configuration and hand them to the [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::logging;
use crate::ui::output::{self, Verbosity};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            config: None,
            verbosity: Verbosity::Normal,
        }
    }
}

impl Context {
    /// The directory commands run against.
    pub fn working_dir(&self) -> Result<PathBuf> {
        let cwd = match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        if cwd.is_absolute() {
            return Ok(cwd);
        }
        let base = std::env::current_dir().context("Failed to read current directory")?;
        Ok(base.join(cwd))
    }

    /// Load configuration, printing any warnings.
    pub fn load_config(&self) -> Result<Config> {
        let result = Config::load(self.config.as_deref()).context("Failed to load config")?;
        for warning in &result.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                self.verbosity,
            );
        }
        Ok(result.config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        config: cli.config.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    logging::init(ctx.verbosity);

    commands::dispatch(cli.command, &ctx)
}
