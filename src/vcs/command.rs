//! vcs::command
//!
//! Backend that shells out to a VCS command.
//!
//! # Working Directory
//!
//! The command runs with the *child's* working directory set to the lookup
//! directory. The parent process's working directory is never touched, so
//! there is nothing to restore afterwards, and back-to-back or concurrent
//! lookups cannot observe each other's directory.
//!
//! If the lookup directory does not exist (a buffer for a file that has not
//! been written yet, in a directory that has not been created yet), the
//! nearest existing ancestor is used instead.
//!
//! # Outcomes
//!
//! | Command result              | Returned                       |
//! |-----------------------------|--------------------------------|
//! | exit 0, non-empty stdout    | `Ok(Some(root))`               |
//! | exit 0, empty stdout        | `Ok(None)`                     |
//! | non-zero exit               | `Ok(None)`                     |
//! | could not spawn             | `Err(ResolveError::Spawn)`     |
//! | non-UTF-8 stdout            | `Err(ResolveError::InvalidOutput)` |
//!
//! A relative root is taken relative to the directory the command ran in
//! and normalized lexically, so `.` and `..` printed from different
//! directories of one repository name the same root.
//!
//! There are no retries and no timeout: a hanging command blocks the caller.

use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::backend::{Backend, ResolveError};
use crate::core::types::{BackendId, RepoRoot};

/// Backend driven by a shell command that prints the repository root.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    id: BackendId,
    command: String,
}

impl CommandBackend {
    /// Create a backend that runs `command` through the platform shell.
    pub fn new(id: BackendId, command: impl Into<String>) -> Self {
        Self {
            id,
            command: command.into(),
        }
    }

    /// The shell command this backend runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell(&self) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

impl Backend for CommandBackend {
    fn id(&self) -> &BackendId {
        &self.id
    }

    fn resolve_root(&self, dir: &Path) -> Result<Option<RepoRoot>, ResolveError> {
        let run_dir = nearest_existing(dir);
        debug!(backend = %self.id, dir = %run_dir.display(), command = %self.command, "resolving repository root");

        let output = self
            .shell()
            .current_dir(&run_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ResolveError::Spawn {
                backend: self.id.clone(),
                dir: run_dir.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!(
                backend = %self.id,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "not a repository"
            );
            return Ok(None);
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| ResolveError::InvalidOutput {
            backend: self.id.clone(),
            message: e.to_string(),
        })?;
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            debug!(backend = %self.id, "command succeeded without output");
            return Ok(None);
        }

        let root = PathBuf::from(trimmed);
        let root = if root.is_absolute() {
            root
        } else {
            normalize(&run_dir.join(root))
        };

        RepoRoot::new(root)
            .map(Some)
            .map_err(|e| ResolveError::InvalidOutput {
                backend: self.id.clone(),
                message: e.to_string(),
            })
    }
}

/// Drop `.` components and fold `..` into its parent, without touching
/// the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// The closest ancestor of `dir` (or `dir` itself) that exists.
fn nearest_existing(dir: &Path) -> PathBuf {
    dir.ancestors()
        .find(|p| !p.as_os_str().is_empty() && p.is_dir())
        .unwrap_or(dir)
        .to_path_buf()
}
