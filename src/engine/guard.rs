//! engine::guard
//!
//! Per-buffer lock state machine.
//!
//! # States
//!
//! ```text
//!            outside repository
//!   Unlocked ------------------> Locked
//!      ^                           |
//!      +---------------------------+
//!            inside repository
//! ```
//!
//! Every buffer starts Unlocked. A check that finds the buffer already in the
//! right state does nothing, so repeated checks never repeat a notification.
//! When there is no active repository there is nothing to compare against
//! and the buffer keeps whatever state it had.
//!
//! # Invariants
//!
//! - A transition is recorded only after the host applied it.
//! - Disabled sessions and non-file buffers never transition.

use std::collections::HashMap;

use tracing::debug;

use super::tracker::RepositoryTracker;
use crate::core::session::Session;
use crate::core::types::{Buffer, BufferId, LockState, Notification};
use crate::host::{HostError, HostSession};

/// Warning shown when the focused buffer gets locked.
pub const LOCKED_MESSAGE: &str = "Outside of repository; modification disabled";

/// Info shown when the focused buffer gets unlocked.
pub const UNLOCKED_MESSAGE: &str = "No longer outside of repository";

/// A state change applied to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Locked,
    Unlocked,
}

/// What a single evaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub transition: Transition,
    /// Present only when the buffer is focused.
    pub notification: Option<Notification>,
}

/// Guard-owned state of one buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferRecord {
    pub state: LockState,
    /// Whether the last check had a repository to compare against.
    pub had_repo_at_last_check: bool,
}

/// Drives lock transitions for all buffers of a session.
#[derive(Debug, Default)]
pub struct BufferGuard {
    records: HashMap<BufferId, BufferRecord>,
}

impl BufferGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lock state of a buffer (Unlocked if never seen).
    pub fn state(&self, id: BufferId) -> LockState {
        self.records.get(&id).map(|r| r.state).unwrap_or_default()
    }

    /// Full record of a buffer, if it has been checked.
    pub fn record(&self, id: BufferId) -> Option<&BufferRecord> {
        self.records.get(&id)
    }

    /// Drop everything known about a buffer the host has closed.
    ///
    /// Returns the record that was dropped, if any.
    pub fn forget(&mut self, id: BufferId) -> Option<BufferRecord> {
        self.records.remove(&id)
    }

    /// Number of buffers with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Buffers currently locked, in id order.
    pub fn locked_buffers(&self) -> Vec<BufferId> {
        let mut ids: Vec<BufferId> = self
            .records
            .iter()
            .filter(|(_, r)| r.state.is_locked())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Check one buffer against the session's repository.
    ///
    /// Returns the transition applied, if any.
    ///
    /// # Errors
    ///
    /// Returns the host's error if it failed to apply a transition; the
    /// recorded state is left unchanged in that case.
    pub fn evaluate<H: HostSession + ?Sized>(
        &mut self,
        session: &Session,
        tracker: &RepositoryTracker,
        buffer: &Buffer,
        host: &mut H,
    ) -> Result<Option<Evaluation>, HostError> {
        if !session.is_enabled() {
            return Ok(None);
        }
        let Some(path) = buffer.file_path() else {
            debug!(buffer = %buffer.id, buftype = %buffer.buftype, "skipping non-file buffer");
            return Ok(None);
        };

        let inside = tracker.is_path_in_current_repository(session, path);
        let record = self.records.entry(buffer.id).or_default();
        let had_repo = std::mem::replace(&mut record.had_repo_at_last_check, inside.is_ok());

        let transition = match (inside, record.state) {
            (Err(_), _) if had_repo => {
                debug!(buffer = %buffer.id, state = %record.state, "repository gone since last check; keeping state");
                return Ok(None);
            }
            (Err(_), _) => {
                debug!(buffer = %buffer.id, "no active repository; skipping");
                return Ok(None);
            }
            (Ok(false), LockState::Unlocked) => Transition::Locked,
            (Ok(true), LockState::Locked) => Transition::Unlocked,
            (Ok(_), _) => return Ok(None),
        };

        let locked = transition == Transition::Locked;
        host.set_buffer_locked(buffer.id, locked)?;
        record.state = if locked {
            LockState::Locked
        } else {
            LockState::Unlocked
        };
        debug!(buffer = %buffer.id, path = %path.display(), state = %record.state, "buffer transitioned");

        let notification = buffer.focused.then(|| match transition {
            Transition::Locked => Notification::warning(LOCKED_MESSAGE),
            Transition::Unlocked => Notification::info(UNLOCKED_MESSAGE),
        });

        Ok(Some(Evaluation {
            transition,
            notification,
        }))
    }
}
