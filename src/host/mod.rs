//! host
//!
//! Adapters between the core and the host editor.
//!
//! # Architecture
//!
//! The core depends only on the [`HostSession`] trait. Two implementations
//! ship with the crate:
//!
//! - [`StdioHost`]: newline-delimited JSON on stdin/stdout, for a thin
//!   editor-side shim (see [`protocol`])
//! - [`MemoryHost`]: in-memory state, for one-shot checks and tests
//!
//! # Modules
//!
//! - `traits`: The `HostSession` trait and `HostError`
//! - [`protocol`]: Wire message types
//! - `stdio`: The JSON-lines adapter and its serve loop
//! - `memory`: The in-memory adapter

mod memory;
pub mod protocol;
mod stdio;
mod traits;

pub use memory::MemoryHost;
pub use stdio::{serve, ServeStats, StdioHost};
pub use traits::{HostError, HostSession};
