//! vcs
//!
//! Repository root resolution through external VCS tooling.
//!
//! # Architecture
//!
//! Each backend wraps one external command that prints the repository root
//! for the directory it runs in. This module never implements version
//! control itself; it only asks the installed tools.
//!
//! # Modules
//!
//! - `backend`: The [`Backend`] trait, [`ResolveError`], and lookup helpers
//! - `command`: [`CommandBackend`], which runs a shell command
//! - [`mock`]: In-memory backend for deterministic testing
//! - `factory`: Backend creation from configuration
//!
//! # Example
//!
//! ```no_run
//! use corral::core::types::BackendId;
//! use corral::vcs::{resolve, CommandBackend, Lookup};
//! use std::path::Path;
//!
//! let git = CommandBackend::new(BackendId::new("git")?, "git rev-parse --show-toplevel");
//! match resolve(&git, Path::new("/home/me/project/src/main.rs"), Lookup::File)? {
//!     Some(root) => println!("inside {}", root),
//!     None => println!("not in a git repository"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod backend;
mod command;
mod factory;
pub mod mock;

pub use backend::{lookup_dir, resolve, Backend, Lookup, ResolveError};
pub use command::CommandBackend;
pub use factory::create_backends;
