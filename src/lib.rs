//! Corral - keep editor buffers inside the repository you are working in
//!
//! Corral watches an editing session's working directory, works out which
//! version-controlled repository it belongs to, and makes every buffer
//! opened from outside that repository read-only. It exists to stop
//! accidental edits to system files or unrelated projects reached through a
//! symlink or an absolute path.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Repository tracker, buffer guard, and event dispatcher
//! - [`core`] - Domain types, session state, and configuration
//! - [`vcs`] - Repository root resolution through external VCS commands
//! - [`host`] - Adapters to the host editor (JSON lines over stdio, in-memory)
//! - [`logging`] - Diagnostic logging setup
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. The cached repository always comes from a fresh query against the
//!    editor's present working directory
//! 2. A buffer is locked iff, at its last check, it lay outside that
//!    repository
//! 3. A disabled session never changes any buffer's lock state
//! 4. Each lock or unlock happens, and is announced, exactly once

pub mod cli;
pub mod core;
pub mod engine;
pub mod host;
pub mod logging;
pub mod ui;
pub mod vcs;
