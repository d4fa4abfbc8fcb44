//! vcs::factory
//!
//! Backend creation from configuration.
//!
//! Commands and the server use [`create_backends`] instead of constructing
//! [`CommandBackend`]s directly, so the priority order always comes from
//! `enabled_vcs`.

use super::backend::Backend;
use super::command::CommandBackend;
use crate::core::config::BackendSpec;

/// Build the configured backends, preserving priority order.
pub fn create_backends(specs: &[BackendSpec]) -> Vec<Box<dyn Backend>> {
    specs
        .iter()
        .map(|spec| {
            Box::new(CommandBackend::new(spec.id.clone(), spec.command.clone()))
                as Box<dyn Backend>
        })
        .collect()
}
