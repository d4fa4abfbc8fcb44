//! core
//!
//! Core domain types, session state, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BackendId, RepoRoot, Repository, Buffer, etc.
//! - [`session`] - Per-session enabled flag and cached repository
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Session state is an explicit value, never ambient

pub mod config;
pub mod session;
pub mod types;
