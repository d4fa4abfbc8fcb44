//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and builds backends
//! 2. Drives the engine (or the tracker directly for one-off queries)
//! 3. Formats and displays output
//!
//! Only `serve` talks to an editor; the other commands run a session
//! against an in-memory host or none at all.

mod check;
mod completion;
mod config_cmd;
mod resolve;
mod serve;

pub use check::check;
pub use completion::completion;
pub use config_cmd::show as config_show;
pub use resolve::resolve;
pub use serve::serve;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Serve => serve(ctx),
        Command::Resolve { path } => resolve(ctx, path.as_deref()),
        Command::Check { files } => check(ctx, &files),
        Command::Config => config_show(ctx),
        Command::Completion { shell } => completion(shell),
    }
}
