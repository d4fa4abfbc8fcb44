//! resolve command - Show which repository a path belongs to

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::Context;
use crate::engine::RepositoryTracker;
use crate::vcs::{create_backends, Lookup};

/// Print `<backend>\t<root>` for the repository containing `path`.
pub fn resolve(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let config = ctx.load_config()?;
    let cwd = ctx.working_dir()?;
    let target = match path {
        Some(p) => cwd.join(p),
        None => cwd,
    };

    let kind = if target.is_dir() {
        Lookup::Directory
    } else {
        Lookup::File
    };

    let tracker = RepositoryTracker::new(create_backends(config.backends()));
    match tracker.discover_from(&target, kind) {
        Some(repo) => {
            println!("{}\t{}", repo.backend, repo.root);
            Ok(())
        }
        None => bail!(
            "'{}' is not inside a repository of any enabled backend",
            target.display()
        ),
    }
}
