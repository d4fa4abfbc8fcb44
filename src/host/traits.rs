//! host::traits
//!
//! The capability the core needs from the host editor.
//!
//! # Design
//!
//! The core never reaches into editor objects. Everything it reads or
//! changes goes through [`HostSession`], which is implemented once per
//! transport ([`StdioHost`](super::StdioHost)) and once in memory
//! ([`MemoryHost`](super::MemoryHost)).
//!
//! Host adapters may fail (the editor went away, a write to its channel
//! failed). Those failures are reported as [`HostError`] and logged by the
//! dispatcher; they never stop event processing.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{Buffer, BufferId, Notification};

/// Errors from host adapter operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host has not reported a working directory yet.
    #[error("host has not reported a working directory")]
    NoWorkingDirectory,

    /// The host channel failed.
    #[error("host i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A message could not be encoded for the host.
    #[error("failed to encode host message: {0}")]
    Encode(String),

    /// The host rejected or could not apply a request.
    #[error("host request failed: {0}")]
    Rejected(String),
}

/// Editor operations available to the core.
pub trait HostSession {
    /// The editor's present working directory.
    fn current_working_directory(&mut self) -> Result<PathBuf, HostError>;

    /// Look up an open buffer. `Ok(None)` if the id is unknown.
    fn buffer(&mut self, id: BufferId) -> Result<Option<Buffer>, HostError>;

    /// Set or clear the buffer's read-only and non-modifiable flags.
    fn set_buffer_locked(&mut self, id: BufferId, locked: bool) -> Result<(), HostError>;

    /// Show a notification to the user.
    fn notify(&mut self, notification: &Notification) -> Result<(), HostError>;
}
