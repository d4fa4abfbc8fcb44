//! engine::dispatch
//!
//! Routes host events and operator commands.
//!
//! # Ordering
//!
//! Events are handled strictly one at a time and each handler runs to
//! completion. A directory change is therefore always fully applied before
//! any buffer event that arrives after it; no further coordination is
//! needed.
//!
//! # Gating
//!
//! - Buffer checks run only while the session is enabled.
//! - Directory changes are ignored until the first enable (the editor-side
//!   triggers are installed then), and tracked from then on, even while
//!   disabled.
//!
//! # Example
//!
//! ```
//! use corral::core::types::{Buffer, BufferId, LockState};
//! use corral::engine::{EventDispatcher, RepositoryTracker};
//! use corral::host::MemoryHost;
//! use corral::vcs::mock::MockBackend;
//! use corral::vcs::Backend;
//!
//! let git = MockBackend::new("git").with_root("/repo");
//! let tracker = RepositoryTracker::new(vec![Box::new(git) as Box<dyn Backend>]);
//! let mut host = MemoryHost::new("/repo");
//! host.open(Buffer::file(1, "/etc/passwd").focused());
//!
//! let mut dispatcher = EventDispatcher::new(tracker, host);
//! dispatcher.on_enable();
//! dispatcher.check(BufferId(1));
//!
//! assert_eq!(dispatcher.guard().state(BufferId(1)), LockState::Locked);
//! ```

use tracing::{debug, error};

use super::guard::BufferGuard;
use super::tracker::RepositoryTracker;
use crate::core::session::Session;
use crate::core::types::{BufferId, Notification, NotificationLevel};
use crate::host::HostSession;

/// An event or command for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A buffer was opened or read.
    BufferOpened(BufferId),
    /// A buffer was wiped out of the editor.
    BufferClosed(BufferId),
    /// The editor's working directory changed.
    DirectoryChanged,
    /// Operator: start checking new buffers.
    Enable,
    /// Operator: stop checking new buffers.
    Disable,
    /// Operator: flip the enabled state.
    Toggle,
}

/// Owns one session and everything needed to drive it.
#[derive(Debug)]
pub struct EventDispatcher<H: HostSession> {
    session: Session,
    tracker: RepositoryTracker,
    guard: BufferGuard,
    host: H,
    noisy: bool,
}

impl<H: HostSession> EventDispatcher<H> {
    /// Create a dispatcher with a fresh, disabled session.
    pub fn new(tracker: RepositoryTracker, host: H) -> Self {
        Self {
            session: Session::new(),
            tracker,
            guard: BufferGuard::new(),
            host,
            noisy: true,
        }
    }

    /// Show or suppress informational notifications.
    pub fn with_noisy(mut self, noisy: bool) -> Self {
        self.noisy = noisy;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tracker(&self) -> &RepositoryTracker {
        &self.tracker
    }

    pub fn guard(&self) -> &BufferGuard {
        &self.guard
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the dispatcher, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Route one event.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::BufferOpened(id) => self.on_buffer_opened(id),
            Event::BufferClosed(id) => self.on_buffer_closed(id),
            Event::DirectoryChanged => self.on_working_directory_changed(),
            Event::Enable => self.on_enable(),
            Event::Disable => self.on_disable(),
            Event::Toggle => self.on_toggle(),
        }
    }

    /// Entry point: check one buffer.
    pub fn check(&mut self, id: BufferId) {
        self.on_buffer_opened(id);
    }

    /// Entry point: re-read the working directory from the host.
    pub fn notify_directory_changed(&mut self) {
        self.on_working_directory_changed();
    }

    pub fn on_buffer_opened(&mut self, id: BufferId) {
        if !self.session.is_enabled() {
            return;
        }

        let buffer = match self.host.buffer(id) {
            Ok(Some(buffer)) => buffer,
            Ok(None) => {
                debug!(buffer = %id, "unknown buffer; skipping");
                return;
            }
            Err(err) => {
                error!(buffer = %id, "failed to look up buffer: {}", err);
                return;
            }
        };

        match self
            .guard
            .evaluate(&self.session, &self.tracker, &buffer, &mut self.host)
        {
            Ok(Some(evaluation)) => {
                if let Some(notification) = evaluation.notification {
                    self.emit(&notification);
                }
            }
            Ok(None) => {}
            Err(err) => error!(buffer = %id, "failed to apply lock state: {}", err),
        }
    }

    /// Forget a closed buffer. Applies whether or not the session is
    /// enabled.
    pub fn on_buffer_closed(&mut self, id: BufferId) {
        if let Some(record) = self.guard.forget(id) {
            debug!(buffer = %id, state = %record.state, "buffer closed");
        }
    }

    pub fn on_working_directory_changed(&mut self) {
        if !self.session.is_armed() {
            debug!("ignoring directory change before first enable");
            return;
        }

        let cwd = match self.host.current_working_directory() {
            Ok(cwd) => cwd,
            Err(err) => {
                error!("failed to read working directory: {}", err);
                return;
            }
        };

        if let Some(notification) = self.tracker.refresh(&mut self.session, &cwd) {
            self.emit(&notification);
        }
    }

    /// Enable checking and seed the repository. Existing buffers are not
    /// re-evaluated.
    pub fn on_enable(&mut self) {
        if self.session.is_enabled() {
            return;
        }
        self.session.set_enabled(true);
        self.on_working_directory_changed();
    }

    /// Disable checking. Locked buffers stay locked.
    pub fn on_disable(&mut self) {
        self.session.set_enabled(false);
    }

    pub fn on_toggle(&mut self) {
        let enabled = self.session.is_enabled();
        self.session.set_enabled(!enabled);
    }

    fn emit(&mut self, notification: &Notification) {
        if notification.level == NotificationLevel::Info && !self.noisy {
            return;
        }
        if let Err(err) = self.host.notify(notification) {
            error!("failed to send notification: {}", err);
        }
    }
}
