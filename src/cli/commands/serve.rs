//! serve command - Drive an editor session over stdin/stdout

use anyhow::{Context as _, Result};
use tracing::info;

use crate::cli::Context;
use crate::engine::{EventDispatcher, RepositoryTracker};
use crate::host::{self, StdioHost};
use crate::vcs::create_backends;

/// Read host events from stdin until EOF, writing requests to stdout.
pub fn serve(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let tracker = RepositoryTracker::new(create_backends(config.backends()));

    let stdout = std::io::stdout();
    let host = StdioHost::new(stdout.lock(), config.truncate());
    let mut dispatcher = EventDispatcher::new(tracker, host).with_noisy(config.noisy());

    let stdin = std::io::stdin();
    let stats = host::serve(stdin.lock(), &mut dispatcher).context("Failed to read host events")?;

    info!(
        events = stats.events,
        rejected = stats.rejected,
        "host closed the session"
    );
    Ok(())
}
