//! engine
//!
//! The repository-boundary state machine.
//!
//! # Architecture
//!
//! ```text
//! host event -> EventDispatcher -> [directory changed] RepositoryTracker::refresh
//!                               -> [buffer opened]     BufferGuard::evaluate
//!                               -> HostSession side effects
//! ```
//!
//! - [`tracker`]: Working-directory repository discovery and membership
//! - [`guard`]: Per-buffer Unlocked/Locked transitions
//! - [`dispatch`]: Event routing and the enabled gate
//!
//! # Invariants
//!
//! - The session's repository always comes from a fresh query against the
//!   host's present working directory.
//! - A buffer is locked iff, at its last check, its file resolved to a
//!   repository other than the session's.
//! - A disabled session performs no transitions and leaves existing locks
//!   alone.
//! - Each transition happens, and is announced, exactly once.

pub mod dispatch;
pub mod guard;
pub mod tracker;

pub use dispatch::{Event, EventDispatcher};
pub use guard::{BufferGuard, BufferRecord, Evaluation, Transition};
pub use tracker::{NoActiveRepository, RepositoryTracker};
