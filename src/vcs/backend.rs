//! vcs::backend
//!
//! Backend trait and lookup helpers.
//!
//! # Design
//!
//! A backend answers one question: "which repository root contains this
//! directory?" `Ok(None)` is the normal answer for a directory outside the
//! backend's repositories. `Err` is reserved for faults in asking the
//! question at all (the command could not be spawned, or printed something
//! that is not a path).
//!
//! Callers pass either a file path or a directory; [`lookup_dir`] turns
//! that into the directory the query starts from.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{BackendId, RepoRoot};

/// Faults while querying a backend.
///
/// "Not a repository" is not an error; see [`Backend::resolve_root`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The backend command could not be started.
    #[error("failed to run {backend} command in '{}': {source}", dir.display())]
    Spawn {
        backend: BackendId,
        dir: PathBuf,
        source: std::io::Error,
    },

    /// The command succeeded but its output is not a usable root path.
    #[error("{backend} command printed an invalid root: {message}")]
    InvalidOutput { backend: BackendId, message: String },
}

/// A version-control backend that can locate repository roots.
pub trait Backend: fmt::Debug {
    /// Identifier of this backend ("git", "svn", ...).
    fn id(&self) -> &BackendId;

    /// Resolve the root of the repository containing `dir`.
    ///
    /// Returns `Ok(None)` when `dir` is not inside a repository of this
    /// backend.
    fn resolve_root(&self, dir: &Path) -> Result<Option<RepoRoot>, ResolveError>;
}

/// What kind of path a lookup starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A file; the query runs in the directory containing it.
    File,
    /// A directory; the query runs in the directory itself.
    Directory,
}

/// Directory a lookup for `path` starts from.
///
/// Relative file names with no directory component resolve to `.`.
pub fn lookup_dir(path: &Path, kind: Lookup) -> PathBuf {
    match kind {
        Lookup::Directory => path.to_path_buf(),
        Lookup::File => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Resolve the root for `path` with a single backend.
pub fn resolve(
    backend: &dyn Backend,
    path: &Path,
    kind: Lookup,
) -> Result<Option<RepoRoot>, ResolveError> {
    backend.resolve_root(&lookup_dir(path, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_lookup_uses_parent() {
        assert_eq!(
            lookup_dir(Path::new("/repo/sub/file.txt"), Lookup::File),
            PathBuf::from("/repo/sub")
        );
    }

    #[test]
    fn directory_lookup_uses_itself() {
        assert_eq!(
            lookup_dir(Path::new("/repo/sub"), Lookup::Directory),
            PathBuf::from("/repo/sub")
        );
    }

    #[test]
    fn bare_file_name_uses_dot() {
        assert_eq!(
            lookup_dir(Path::new("file.txt"), Lookup::File),
            PathBuf::from(".")
        );
    }

    #[test]
    fn root_file_uses_root() {
        assert_eq!(
            lookup_dir(Path::new("/file.txt"), Lookup::File),
            PathBuf::from("/")
        );
    }
}
