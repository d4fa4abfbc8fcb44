//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if started in that directory
//! - `--config <path>`: Use this config file instead of the default search
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Corral - keep editor buffers inside the repository you are working in
#[derive(Parser, Debug)]
#[command(name = "corral")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if corral was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Config file to load
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve an editor session over stdin/stdout (JSON lines)
    Serve,

    /// Show which repository a path belongs to
    Resolve {
        /// File or directory to resolve (default: the working directory)
        path: Option<PathBuf>,
    },

    /// Report which files would be locked from the working directory
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
