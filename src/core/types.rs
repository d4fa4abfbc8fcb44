//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BackendId`] - Validated VCS backend identifier ("git", "svn", ...)
//! - [`RepoRoot`] - Absolute repository root path
//! - [`Repository`] - A (backend, root) pair
//! - [`BufferId`] - Host editor buffer number
//! - [`Buffer`] - Snapshot of an open buffer as reported by the host
//! - [`Notification`] - User-facing message with a severity
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use corral::core::types::{BackendId, RepoRoot, Repository};
//!
//! let git = BackendId::new("git").unwrap();
//! let root = RepoRoot::new("/home/me/project").unwrap();
//! let repo = Repository::new(git, root);
//! assert_eq!(repo.to_string(), "git repository at '/home/me/project'");
//!
//! assert!(BackendId::new("").is_err());
//! assert!(RepoRoot::new("relative/path").is_err());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid backend id: {0}")]
    InvalidBackendId(String),

    #[error("invalid repository root: {0}")]
    InvalidRoot(String),
}

/// A validated VCS backend identifier.
///
/// Backend ids name an entry in `enabled_vcs` and key the `vcs_command`
/// table, so they are restricted to ASCII alphanumerics, `-` and `_`.
///
/// # Example
///
/// ```
/// use corral::core::types::BackendId;
///
/// assert_eq!(BackendId::new("git").unwrap().as_str(), "git");
/// assert!(BackendId::new("git svn").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackendId(String);

impl BackendId {
    /// Create a new validated backend id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBackendId` if the id is empty or contains
    /// characters other than ASCII alphanumerics, `-` and `_`.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidBackendId(
                "backend id cannot be empty".into(),
            ));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TypeError::InvalidBackendId(format!(
                "'{}' contains invalid character {:?}",
                id, c
            )));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BackendId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BackendId> for String {
    fn from(id: BackendId) -> Self {
        id.0
    }
}

impl AsRef<str> for BackendId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Absolute path of a repository root, as printed by a backend command.
///
/// Two roots are equal only if their paths are exactly equal. No
/// canonicalization happens here; backends are expected to report roots
/// consistently for the same repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct RepoRoot(PathBuf);

impl RepoRoot {
    /// Create a repository root.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoot` if the path is empty or relative.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(TypeError::InvalidRoot("root cannot be empty".into()));
        }
        if !path.is_absolute() {
            return Err(TypeError::InvalidRoot(format!(
                "'{}' is not an absolute path",
                path.display()
            )));
        }
        Ok(Self(path))
    }

    /// Get the root as a path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RepoRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<PathBuf> for RepoRoot {
    type Error = TypeError;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepoRoot> for PathBuf {
    fn from(root: RepoRoot) -> Self {
        root.0
    }
}

impl AsRef<Path> for RepoRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// A repository: the backend that recognized it and its root.
///
/// Always recomputed wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Backend that reported this root
    pub backend: BackendId,
    /// Absolute root path
    pub root: RepoRoot,
}

impl Repository {
    /// Create a repository value.
    pub fn new(backend: BackendId, root: RepoRoot) -> Self {
        Self { backend, root }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} repository at '{}'", self.backend, self.root)
    }
}

/// Host editor buffer number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An open editor buffer as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffer {
    /// Buffer number
    pub id: BufferId,
    /// Full path of the file the buffer shows, if any
    #[serde(default)]
    pub name: Option<PathBuf>,
    /// Host buffer type; empty for normal file buffers
    #[serde(default)]
    pub buftype: String,
    /// Whether this buffer is the one currently focused
    #[serde(default)]
    pub focused: bool,
}

impl Buffer {
    /// Create a normal file buffer.
    pub fn file(id: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            id: BufferId(id),
            name: Some(path.into()),
            buftype: String::new(),
            focused: false,
        }
    }

    /// Mark the buffer as focused.
    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    /// Path of the backing file, or `None` for non-file buffers.
    ///
    /// Help pages, terminals, quickfix lists and unnamed scratch buffers
    /// carry a non-empty buftype or no name, and are never checked.
    pub fn file_path(&self) -> Option<&Path> {
        if !self.buftype.is_empty() {
            return None;
        }
        self.name
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Lock state of a single buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Editable (initial state)
    #[default]
    Unlocked,
    /// Read-only and unmodifiable
    Locked,
}

impl LockState {
    /// Whether this is the locked state.
    pub fn is_locked(self) -> bool {
        self == LockState::Locked
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "unlocked"),
            LockState::Locked => write!(f, "locked"),
        }
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Informational; suppressed when `noisy` is off
    Info,
    /// Always shown
    Warning,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Create an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }
}
