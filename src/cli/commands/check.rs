//! check command - Report which files would be locked

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::Context;
use crate::core::types::{Buffer, BufferId};
use crate::engine::{EventDispatcher, RepositoryTracker};
use crate::host::MemoryHost;
use crate::ui::output;
use crate::vcs::create_backends;

/// Open each file as a buffer in a fresh session and print its lock state.
pub fn check(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let config = ctx.load_config()?;
    let cwd = ctx.working_dir()?;

    let mut host = MemoryHost::new(&cwd);
    let buffers: Vec<(BufferId, PathBuf)> = files
        .iter()
        .enumerate()
        .map(|(i, file)| (BufferId(i as u64 + 1), cwd.join(file)))
        .collect();
    for (id, path) in &buffers {
        host.open(Buffer::file(id.0, path.clone()));
    }

    let tracker = RepositoryTracker::new(create_backends(config.backends()));
    let mut dispatcher = EventDispatcher::new(tracker, host).with_noisy(config.noisy());
    dispatcher.on_enable();

    match dispatcher.session().current_repository() {
        Some(repo) => output::print(format!("# {}", repo), ctx.verbosity),
        None => output::warn(
            format!(
                "'{}' is not in a repository; no buffer would be locked",
                cwd.display()
            ),
            ctx.verbosity,
        ),
    }

    for (id, path) in &buffers {
        dispatcher.check(*id);
        println!("{}\t{}", dispatcher.guard().state(*id), path.display());
    }

    Ok(())
}
