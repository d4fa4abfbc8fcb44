//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! CLI output respects the quiet flag. Notification text for the editor is
//! formatted here too: prefixed with the plugin name and optionally clipped
//! to the window width.

use std::fmt::Display;

/// Prefix for every editor notification.
pub const NOTIFICATION_PREFIX: &str = "corral: ";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Prefix a notification with the plugin name.
pub fn format_notification(message: &str) -> String {
    format!("{}{}", NOTIFICATION_PREFIX, message)
}

/// Clip `message` so it fits a window `width` columns wide.
///
/// Leaves one column free so echoing never wraps; clipped text ends with
/// an ellipsis.
pub fn fit_to_width(message: &str, width: usize) -> String {
    let limit = width.saturating_sub(1);
    if message.chars().count() <= limit {
        return message.to_string();
    }
    let mut clipped: String = message.chars().take(width.saturating_sub(2)).collect();
    clipped.push('…');
    clipped
}
