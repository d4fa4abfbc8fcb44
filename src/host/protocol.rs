//! host::protocol
//!
//! Wire messages exchanged with the editor-side shim.
//!
//! # Format
//!
//! One JSON object per line, in both directions, tagged by `type`.
//!
//! Editor to corral ([`HostEvent`]):
//!
//! ```text
//! {"type":"cwd_changed","cwd":"/home/me/project","width":120}
//! {"type":"buffer_opened","buffer":{"id":3,"name":"/etc/hosts","buftype":"","focused":true}}
//! {"type":"buffer_closed","buffer":3}
//! {"type":"command","name":"toggle"}
//! ```
//!
//! Corral to editor ([`HostRequest`]):
//!
//! ```text
//! {"type":"set_locked","buffer":3,"locked":true}
//! {"type":"notify","level":"warning","message":"corral: Outside of repository; modification disabled"}
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::types::{Buffer, BufferId, NotificationLevel};
use crate::engine::Event;

/// Operator command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandName {
    Enable,
    Disable,
    Toggle,
}

/// A message from the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A buffer was read into the editor.
    BufferOpened {
        buffer: Buffer,
        /// Width of the current window, in columns
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<usize>,
    },
    /// A buffer was wiped out; its id may be reused later.
    BufferClosed { buffer: BufferId },
    /// The editor's working directory is now `cwd`.
    CwdChanged {
        cwd: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<usize>,
    },
    /// The user ran an operator command.
    Command { name: CommandName },
}

impl HostEvent {
    /// The dispatcher event this message triggers.
    pub fn to_event(&self) -> Event {
        match self {
            HostEvent::BufferOpened { buffer, .. } => Event::BufferOpened(buffer.id),
            HostEvent::BufferClosed { buffer } => Event::BufferClosed(*buffer),
            HostEvent::CwdChanged { .. } => Event::DirectoryChanged,
            HostEvent::Command { name } => match name {
                CommandName::Enable => Event::Enable,
                CommandName::Disable => Event::Disable,
                CommandName::Toggle => Event::Toggle,
            },
        }
    }
}

/// A message to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Set `readonly` and clear `modifiable` (or the reverse).
    SetLocked { buffer: BufferId, locked: bool },
    /// Echo a message with the given highlight.
    Notify {
        level: NotificationLevel,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_buffer_opened() {
        let line = r#"{"type":"buffer_opened","buffer":{"id":3,"name":"/etc/hosts","buftype":"","focused":true},"width":80}"#;
        let event: HostEvent = serde_json::from_str(line).unwrap();

        match &event {
            HostEvent::BufferOpened { buffer, width } => {
                assert_eq!(buffer.id, BufferId(3));
                assert!(buffer.focused);
                assert_eq!(*width, Some(80));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(event.to_event(), Event::BufferOpened(BufferId(3)));
    }

    #[test]
    fn parse_buffer_closed() {
        let event: HostEvent =
            serde_json::from_str(r#"{"type":"buffer_closed","buffer":7}"#).unwrap();
        assert_eq!(event, HostEvent::BufferClosed { buffer: BufferId(7) });
        assert_eq!(event.to_event(), Event::BufferClosed(BufferId(7)));
    }

    #[test]
    fn parse_cwd_changed_without_width() {
        let event: HostEvent =
            serde_json::from_str(r#"{"type":"cwd_changed","cwd":"/repo"}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::CwdChanged {
                cwd: PathBuf::from("/repo"),
                width: None
            }
        );
        assert_eq!(event.to_event(), Event::DirectoryChanged);
    }

    #[test]
    fn parse_commands() {
        for (name, expected) in [
            ("enable", Event::Enable),
            ("disable", Event::Disable),
            ("toggle", Event::Toggle),
        ] {
            let line = format!(r#"{{"type":"command","name":"{}"}}"#, name);
            let event: HostEvent = serde_json::from_str(&line).unwrap();
            assert_eq!(event.to_event(), expected);
        }
    }

    #[test]
    fn unknown_type_rejected() {
        let result: Result<HostEvent, _> = serde_json::from_str(r#"{"type":"quit"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn requests_serialize_tagged() {
        let lock = serde_json::to_string(&HostRequest::SetLocked {
            buffer: BufferId(3),
            locked: true,
        })
        .unwrap();
        assert_eq!(lock, r#"{"type":"set_locked","buffer":3,"locked":true}"#);

        let notify = serde_json::to_string(&HostRequest::Notify {
            level: NotificationLevel::Warning,
            message: "corral: hi".to_string(),
        })
        .unwrap();
        assert_eq!(
            notify,
            r#"{"type":"notify","level":"warning","message":"corral: hi"}"#
        );
    }
}
