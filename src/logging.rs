//! logging
//!
//! Diagnostic logging via `tracing`.
//!
//! # Design
//!
//! Logs always go to stderr. In `serve` mode stdout carries the host
//! protocol, so nothing else may ever be written there.
//!
//! The filter comes from `RUST_LOG` when set; otherwise from the CLI
//! verbosity (`--debug` for debug, `--quiet` for errors only, warnings by
//! default).

use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Default filter directive for a verbosity level.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Debug => "debug",
    }
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives() {
        assert_eq!(default_directive(Verbosity::Quiet), "error");
        assert_eq!(default_directive(Verbosity::Normal), "warn");
        assert_eq!(default_directive(Verbosity::Debug), "debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(Verbosity::Normal);
        init(Verbosity::Debug);
    }
}
