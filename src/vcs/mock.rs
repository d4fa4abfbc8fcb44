//! vcs::mock
//!
//! Mock backend for deterministic testing.
//!
//! # Design
//!
//! The mock resolves directories against a set of registered roots by
//! lexical prefix: a directory resolves to the longest registered root it
//! lives under. Exact per-directory overrides take precedence, and a spawn
//! fault can be injected to exercise error paths. Every lookup is recorded.
//!
//! Clones share state, so a test can keep a handle and rearrange the
//! filesystem picture after handing the backend to a tracker.
//!
//! # Example
//!
//! ```
//! use corral::core::types::RepoRoot;
//! use corral::vcs::mock::MockBackend;
//! use corral::vcs::Backend;
//! use std::path::Path;
//!
//! let git = MockBackend::new("git").with_root("/repo");
//!
//! assert_eq!(
//!     git.resolve_root(Path::new("/repo/sub")).unwrap(),
//!     Some(RepoRoot::new("/repo").unwrap())
//! );
//! assert_eq!(git.resolve_root(Path::new("/tmp")).unwrap(), None);
//! assert_eq!(git.calls().len(), 2);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::backend::{Backend, ResolveError};
use crate::core::types::{BackendId, RepoRoot};

/// Mock backend for testing.
#[derive(Debug, Clone)]
pub struct MockBackend {
    id: BackendId,
    inner: Arc<Mutex<MockBackendInner>>,
}

#[derive(Debug, Default)]
struct MockBackendInner {
    roots: Vec<RepoRoot>,
    overrides: HashMap<PathBuf, Option<RepoRoot>>,
    fail_spawn: bool,
    calls: Vec<PathBuf>,
}

impl MockBackend {
    /// Create a mock backend that knows no repositories.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid backend id.
    pub fn new(id: &str) -> Self {
        Self {
            id: BackendId::new(id).expect("mock backend id must be valid"),
            inner: Arc::new(Mutex::new(MockBackendInner::default())),
        }
    }

    /// Register a repository root (builder form).
    pub fn with_root(self, root: &str) -> Self {
        self.add_root(root);
        self
    }

    /// Register a repository root.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not absolute.
    pub fn add_root(&self, root: &str) {
        let root = RepoRoot::new(root).expect("mock root must be absolute");
        self.inner.lock().unwrap().roots.push(root);
    }

    /// Forget a repository root.
    pub fn remove_root(&self, root: &str) {
        self.inner
            .lock()
            .unwrap()
            .roots
            .retain(|r| r.as_path() != Path::new(root));
    }

    /// Force the answer for one exact directory.
    ///
    /// # Panics
    ///
    /// Panics if `root` is given and is not absolute.
    pub fn set_dir(&self, dir: &str, root: Option<&str>) {
        let root = root.map(|r| RepoRoot::new(r).expect("mock root must be absolute"));
        self.inner
            .lock()
            .unwrap()
            .overrides
            .insert(PathBuf::from(dir), root);
    }

    /// Make every lookup fail as if the command could not be spawned.
    pub fn fail_spawn(&self, fail: bool) {
        self.inner.lock().unwrap().fail_spawn = fail;
    }

    /// Directories looked up so far, in order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Clear recorded lookups.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }
}

impl Backend for MockBackend {
    fn id(&self) -> &BackendId {
        &self.id
    }

    fn resolve_root(&self, dir: &Path) -> Result<Option<RepoRoot>, ResolveError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(dir.to_path_buf());

        if inner.fail_spawn {
            return Err(ResolveError::Spawn {
                backend: self.id.clone(),
                dir: dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock spawn failure"),
            });
        }

        if let Some(answer) = inner.overrides.get(dir) {
            return Ok(answer.clone());
        }

        Ok(inner
            .roots
            .iter()
            .filter(|root| dir.starts_with(root.as_path()))
            .max_by_key(|root| root.as_path().components().count())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        let backend = MockBackend::new("git")
            .with_root("/repo")
            .with_root("/repo/vendor/lib");

        assert_eq!(
            backend.resolve_root(Path::new("/repo/vendor/lib/src")).unwrap(),
            Some(RepoRoot::new("/repo/vendor/lib").unwrap())
        );
        assert_eq!(
            backend.resolve_root(Path::new("/repo/vendor")).unwrap(),
            Some(RepoRoot::new("/repo").unwrap())
        );
    }

    #[test]
    fn prefix_is_component_wise() {
        let backend = MockBackend::new("git").with_root("/repo");
        assert_eq!(backend.resolve_root(Path::new("/repository")).unwrap(), None);
    }

    #[test]
    fn override_beats_roots() {
        let backend = MockBackend::new("git").with_root("/repo");
        backend.set_dir("/repo/detached", None);
        backend.set_dir("/tmp", Some("/repo"));

        assert_eq!(backend.resolve_root(Path::new("/repo/detached")).unwrap(), None);
        assert_eq!(
            backend.resolve_root(Path::new("/tmp")).unwrap(),
            Some(RepoRoot::new("/repo").unwrap())
        );
    }

    #[test]
    fn spawn_failure_injected() {
        let backend = MockBackend::new("svn").with_root("/repo");
        backend.fail_spawn(true);
        assert!(backend.resolve_root(Path::new("/repo")).is_err());
        backend.fail_spawn(false);
        assert!(backend.resolve_root(Path::new("/repo")).unwrap().is_some());
    }

    #[test]
    fn clones_share_state() {
        let backend = MockBackend::new("git");
        let handle = backend.clone();
        handle.add_root("/repo");

        assert!(backend.resolve_root(Path::new("/repo/a")).unwrap().is_some());
        assert_eq!(handle.calls(), vec![PathBuf::from("/repo/a")]);

        handle.remove_root("/repo");
        assert!(backend.resolve_root(Path::new("/repo/a")).unwrap().is_none());
    }
}
