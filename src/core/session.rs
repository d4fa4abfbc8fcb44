//! core::session
//!
//! Per-editor-session state.
//!
//! # Invariants
//!
//! - A new session is disabled, unarmed, and has no repository.
//! - `current_repository` is only ever replaced wholesale by the tracker.
//! - Nothing here survives the process; there is no persisted state.

use super::types::Repository;

/// State of one editing session.
///
/// Owned by the [`EventDispatcher`](crate::engine::EventDispatcher) and lent
/// to the tracker and the guard, so independent sessions can coexist in one
/// process (and in one test binary).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    enabled: bool,
    armed: bool,
    current_repository: Option<Repository>,
}

impl Session {
    /// Create a disabled session with no repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether buffer checks are currently performed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled flag, returning the previous value.
    ///
    /// Enabling also arms the session: from then on working-directory
    /// changes are tracked, even across later disables.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let previous = self.enabled;
        self.enabled = enabled;
        if enabled {
            self.armed = true;
        }
        previous
    }

    /// Whether the session has ever been enabled.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The repository the working directory was last found in.
    pub fn current_repository(&self) -> Option<&Repository> {
        self.current_repository.as_ref()
    }

    /// Replace the current repository, returning the previous one.
    pub(crate) fn replace_repository(
        &mut self,
        repository: Option<Repository>,
    ) -> Option<Repository> {
        std::mem::replace(&mut self.current_repository, repository)
    }
}
