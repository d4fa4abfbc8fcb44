//! engine::tracker
//!
//! Which repository the working directory belongs to.
//!
//! # Design
//!
//! The tracker holds the configured backends in priority order and nothing
//! else; the cached answer lives in the [`Session`]. Only the
//! working-directory-level repository is cached. Individual paths are
//! re-resolved on every membership query, because a file's repository can
//! change between checks (moved, or its repository re-initialized).
//!
//! # Error Absorption
//!
//! Backend faults ([`ResolveError`]) stop here: they are logged and then
//! treated exactly like "not a repository". Nothing from the VCS layer
//! reaches the dispatcher.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::session::Session;
use crate::core::types::{BackendId, Notification, RepoRoot, Repository};
use crate::vcs::{resolve, Backend, Lookup, ResolveError};

/// Membership was queried while the session has no repository.
///
/// Callers treat this as "cannot evaluate, skip", never as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the working directory is not in a repository")]
pub struct NoActiveRepository;

/// Resolves and caches the working directory's repository.
#[derive(Debug)]
pub struct RepositoryTracker {
    backends: Vec<Box<dyn Backend>>,
}

impl RepositoryTracker {
    /// Create a tracker over backends in priority order.
    pub fn new(backends: Vec<Box<dyn Backend>>) -> Self {
        Self { backends }
    }

    /// Configured backend ids, in priority order.
    pub fn backend_ids(&self) -> impl Iterator<Item = &BackendId> {
        self.backends.iter().map(|b| b.id())
    }

    /// Find the repository containing directory `dir`.
    ///
    /// Tries each backend in order; the first one that reports a root wins.
    pub fn discover(&self, dir: &Path) -> Option<Repository> {
        self.discover_from(dir, Lookup::Directory)
    }

    /// Find the repository containing `path`, starting as `kind` dictates.
    pub fn discover_from(&self, path: &Path, kind: Lookup) -> Option<Repository> {
        self.backends.iter().find_map(|backend| {
            absorb(resolve(backend.as_ref(), path, kind))
                .map(|root| Repository::new(backend.id().clone(), root))
        })
    }

    /// Recompute the session's repository for a new working directory.
    ///
    /// Returns a notification only when the repository actually changed,
    /// including a transition to or from "no repository".
    pub fn refresh(&self, session: &mut Session, working_directory: &Path) -> Option<Notification> {
        let discovered = self.discover(working_directory);
        if session.current_repository() == discovered.as_ref() {
            debug!(cwd = %working_directory.display(), "repository unchanged");
            return None;
        }

        let notification = match &discovered {
            Some(repo) => Notification::info(format!(
                "Corralling new buffers to {} repository at '{}'",
                repo.backend, repo.root
            )),
            None => Notification::info("No longer in a repository"),
        };

        debug!(cwd = %working_directory.display(), repository = ?discovered, "repository changed");
        session.replace_repository(discovered);
        Some(notification)
    }

    /// Whether file `path` lives in the session's current repository.
    ///
    /// Only the current repository's backend is consulted, and the result is
    /// compared against the cached root for exact equality.
    ///
    /// # Errors
    ///
    /// Returns [`NoActiveRepository`] if the session has no repository.
    pub fn is_path_in_current_repository(
        &self,
        session: &Session,
        path: &Path,
    ) -> Result<bool, NoActiveRepository> {
        let current = session.current_repository().ok_or(NoActiveRepository)?;
        let backend = self
            .backends
            .iter()
            .find(|b| b.id() == &current.backend)
            .ok_or(NoActiveRepository)?;

        let root = absorb(resolve(backend.as_ref(), path, Lookup::File));
        Ok(root.as_ref() == Some(&current.root))
    }
}

/// Fold a backend fault into "not a repository".
fn absorb(result: Result<Option<RepoRoot>, ResolveError>) -> Option<RepoRoot> {
    match result {
        Ok(root) => root,
        Err(err) => {
            warn!("{}; treating as not a repository", err);
            None
        }
    }
}
