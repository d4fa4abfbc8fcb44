//! host::memory
//!
//! In-memory host for one-shot checks and deterministic testing.
//!
//! # Design
//!
//! `MemoryHost` keeps buffers, the working directory, and the editor-side
//! read-only flags in plain collections, and records every lock request and
//! notification it receives. The `check` command drives it directly; tests
//! use it to observe exactly what the core asked the editor to do.
//!
//! # Example
//!
//! ```
//! use corral::core::types::{Buffer, BufferId, Notification};
//! use corral::host::{HostSession, MemoryHost};
//!
//! let mut host = MemoryHost::new("/repo");
//! host.open(Buffer::file(1, "/repo/README.md"));
//!
//! host.set_buffer_locked(BufferId(1), true).unwrap();
//! host.notify(&Notification::warning("careful")).unwrap();
//!
//! assert!(host.is_locked(BufferId(1)));
//! assert_eq!(host.lock_calls(), &[(BufferId(1), true)]);
//! assert_eq!(host.notifications().len(), 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::traits::{HostError, HostSession};
use crate::core::types::{Buffer, BufferId, Notification};

/// Host backed by in-memory state.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    cwd: Option<PathBuf>,
    buffers: BTreeMap<BufferId, Buffer>,
    locked: BTreeSet<BufferId>,
    lock_calls: Vec<(BufferId, bool)>,
    notifications: Vec<Notification>,
    fail_lock_requests: bool,
}

impl MemoryHost {
    /// Create a host whose working directory is `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            ..Default::default()
        }
    }

    /// Change the working directory. Does not notify anyone.
    pub fn set_cwd(&mut self, cwd: impl Into<PathBuf>) {
        self.cwd = Some(cwd.into());
    }

    /// Add or replace an open buffer.
    ///
    /// A focused buffer takes focus away from every other buffer.
    pub fn open(&mut self, buffer: Buffer) {
        if buffer.focused {
            for other in self.buffers.values_mut() {
                other.focused = false;
            }
        }
        self.buffers.insert(buffer.id, buffer);
    }

    /// Wipe out a buffer. Does not notify anyone.
    pub fn close(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        self.locked.remove(&id);
    }

    /// Open buffers in id order.
    pub fn buffers(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.values()
    }

    /// Whether the editor-side flags mark the buffer read-only.
    pub fn is_locked(&self, id: BufferId) -> bool {
        self.locked.contains(&id)
    }

    /// Every lock request received, in order.
    pub fn lock_calls(&self) -> &[(BufferId, bool)] {
        &self.lock_calls
    }

    /// Every notification received, in order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Make lock requests fail, as if the editor rejected them.
    pub fn fail_lock_requests(&mut self, fail: bool) {
        self.fail_lock_requests = fail;
    }
}

impl HostSession for MemoryHost {
    fn current_working_directory(&mut self) -> Result<PathBuf, HostError> {
        self.cwd.clone().ok_or(HostError::NoWorkingDirectory)
    }

    fn buffer(&mut self, id: BufferId) -> Result<Option<Buffer>, HostError> {
        Ok(self.buffers.get(&id).cloned())
    }

    fn set_buffer_locked(&mut self, id: BufferId, locked: bool) -> Result<(), HostError> {
        if self.fail_lock_requests {
            return Err(HostError::Rejected(format!("buffer {} is not editable", id)));
        }
        self.lock_calls.push((id, locked));
        if locked {
            self.locked.insert(id);
        } else {
            self.locked.remove(&id);
        }
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), HostError> {
        self.notifications.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_working_directory() {
        let mut host = MemoryHost::default();
        assert!(matches!(
            host.current_working_directory(),
            Err(HostError::NoWorkingDirectory)
        ));
    }

    #[test]
    fn focus_is_exclusive() {
        let mut host = MemoryHost::new("/");
        host.open(Buffer::file(1, "/a").focused());
        host.open(Buffer::file(2, "/b").focused());

        assert!(!host.buffer(BufferId(1)).unwrap().unwrap().focused);
        assert!(host.buffer(BufferId(2)).unwrap().unwrap().focused);
    }

    #[test]
    fn unlock_clears_flag() {
        let mut host = MemoryHost::new("/");
        host.set_buffer_locked(BufferId(1), true).unwrap();
        host.set_buffer_locked(BufferId(1), false).unwrap();
        assert!(!host.is_locked(BufferId(1)));
        assert_eq!(host.lock_calls().len(), 2);
    }

    #[test]
    fn close_clears_buffer_and_lock() {
        let mut host = MemoryHost::new("/");
        host.open(Buffer::file(1, "/a"));
        host.set_buffer_locked(BufferId(1), true).unwrap();

        host.close(BufferId(1));
        assert!(host.buffer(BufferId(1)).unwrap().is_none());
        assert!(!host.is_locked(BufferId(1)));
    }

    #[test]
    fn rejected_request_not_recorded() {
        let mut host = MemoryHost::new("/");
        host.fail_lock_requests(true);
        assert!(host.set_buffer_locked(BufferId(1), true).is_err());
        assert!(host.lock_calls().is_empty());
        assert!(!host.is_locked(BufferId(1)));
    }
}
