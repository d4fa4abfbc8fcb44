//! host::stdio
//!
//! Host adapter over newline-delimited JSON.
//!
//! # Design
//!
//! The editor-side shim forwards its autocommands and user commands as
//! [`HostEvent`] lines and applies the [`HostRequest`] lines it receives.
//! Everything the core may ask the host about (working directory, buffers,
//! window width) arrives inside those events, so `StdioHost` answers from
//! what it has observed instead of making round trips.
//!
//! Notification text is prefixed with `corral: ` and, when truncation is on,
//! clipped to the last reported window width so it never triggers the
//! editor's "Press ENTER" prompt.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use super::protocol::{HostEvent, HostRequest};
use super::traits::{HostError, HostSession};
use crate::core::types::{Buffer, BufferId, Notification};
use crate::engine::EventDispatcher;
use crate::ui::output;

/// Host that reads state from events and writes requests to `W`.
#[derive(Debug)]
pub struct StdioHost<W: Write> {
    out: W,
    cwd: Option<PathBuf>,
    buffers: HashMap<BufferId, Buffer>,
    width: Option<usize>,
    truncate: bool,
}

impl<W: Write> StdioHost<W> {
    /// Create a host writing requests to `out`.
    pub fn new(out: W, truncate: bool) -> Self {
        Self {
            out,
            cwd: None,
            buffers: HashMap::new(),
            width: None,
            truncate,
        }
    }

    /// Record the host state carried by an incoming event.
    pub fn observe(&mut self, event: &HostEvent) {
        match event {
            HostEvent::BufferOpened { buffer, width } => {
                if buffer.focused {
                    for other in self.buffers.values_mut() {
                        other.focused = false;
                    }
                }
                self.buffers.insert(buffer.id, buffer.clone());
                if width.is_some() {
                    self.width = *width;
                }
            }
            HostEvent::BufferClosed { buffer } => {
                self.buffers.remove(buffer);
            }
            HostEvent::CwdChanged { cwd, width } => {
                self.cwd = Some(cwd.clone());
                if width.is_some() {
                    self.width = *width;
                }
            }
            HostEvent::Command { .. } => {}
        }
    }

    /// Consume the host, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn send(&mut self, request: &HostRequest) -> Result<(), HostError> {
        let line =
            serde_json::to_string(request).map_err(|e| HostError::Encode(e.to_string()))?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> HostSession for StdioHost<W> {
    fn current_working_directory(&mut self) -> Result<PathBuf, HostError> {
        self.cwd.clone().ok_or(HostError::NoWorkingDirectory)
    }

    fn buffer(&mut self, id: BufferId) -> Result<Option<Buffer>, HostError> {
        Ok(self.buffers.get(&id).cloned())
    }

    fn set_buffer_locked(&mut self, id: BufferId, locked: bool) -> Result<(), HostError> {
        self.send(&HostRequest::SetLocked { buffer: id, locked })
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), HostError> {
        let mut message = output::format_notification(&notification.message);
        if self.truncate {
            if let Some(width) = self.width {
                message = output::fit_to_width(&message, width);
            }
        }
        self.send(&HostRequest::Notify {
            level: notification.level,
            message,
        })
    }
}

/// Counters for one serve session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Events dispatched
    pub events: usize,
    /// Lines that could not be parsed
    pub rejected: usize,
}

/// Dispatch events read from `input` until end of input.
///
/// Malformed lines, including ones that are not UTF-8, are logged and
/// skipped.
///
/// # Errors
///
/// Returns an error only if reading from `input` fails.
pub fn serve<R: BufRead, W: Write>(
    input: R,
    dispatcher: &mut EventDispatcher<StdioHost<W>>,
) -> Result<ServeStats, HostError> {
    let mut stats = ServeStats::default();

    for raw in input.split(b'\n') {
        let raw = raw?;
        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line.trim(),
            Err(err) => {
                warn!("ignoring host message that is not UTF-8: {}", err);
                stats.rejected += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!("ignoring malformed host message: {}", err);
                stats.rejected += 1;
                continue;
            }
        };

        debug!(?event, "host event");
        dispatcher.host_mut().observe(&event);
        dispatcher.handle(event.to_event());
        stats.events += 1;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::NotificationLevel;
    use crate::engine::RepositoryTracker;
    use crate::vcs::mock::MockBackend;
    use crate::vcs::Backend;

    fn requests(bytes: &[u8]) -> Vec<HostRequest> {
        String::from_utf8_lossy(bytes)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn dispatcher(truncate: bool) -> EventDispatcher<StdioHost<Vec<u8>>> {
        let git = MockBackend::new("git").with_root("/repo");
        let tracker = RepositoryTracker::new(vec![Box::new(git) as Box<dyn Backend>]);
        EventDispatcher::new(tracker, StdioHost::new(Vec::new(), truncate))
    }

    #[test]
    fn full_session() {
        let input = concat!(
            r#"{"type":"cwd_changed","cwd":"/repo/sub"}"#, "\n",
            r#"{"type":"command","name":"enable"}"#, "\n",
            r#"{"type":"buffer_opened","buffer":{"id":1,"name":"/repo/sub/a.txt","focused":true}}"#, "\n",
            r#"{"type":"buffer_opened","buffer":{"id":2,"name":"/tmp/other.txt","focused":true}}"#, "\n",
        );

        let mut d = dispatcher(false);
        let stats = serve(input.as_bytes(), &mut d).unwrap();
        assert_eq!(stats, ServeStats { events: 4, rejected: 0 });

        let out = d.into_host().into_inner();
        assert_eq!(
            requests(&out),
            vec![
                HostRequest::Notify {
                    level: NotificationLevel::Info,
                    message: "corral: Corralling new buffers to git repository at '/repo'"
                        .to_string(),
                },
                HostRequest::SetLocked {
                    buffer: BufferId(2),
                    locked: true,
                },
                HostRequest::Notify {
                    level: NotificationLevel::Warning,
                    message: "corral: Outside of repository; modification disabled".to_string(),
                },
            ]
        );
    }

    #[test]
    fn malformed_lines_skipped() {
        let input = "not json\n\n{\"type\":\"command\",\"name\":\"enable\"}\n";
        let mut d = dispatcher(false);
        let stats = serve(input.as_bytes(), &mut d).unwrap();
        assert_eq!(stats, ServeStats { events: 1, rejected: 1 });
        assert!(d.session().is_enabled());
    }

    #[test]
    fn invalid_utf8_line_skipped() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"type\":\"cwd_changed\",\"cwd\":\"/repo\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"type\":\"command\",\"name\":\"enable\"}\n");

        let mut d = dispatcher(false);
        let stats = serve(input.as_slice(), &mut d).unwrap();

        assert_eq!(stats, ServeStats { events: 2, rejected: 1 });
        assert!(d.session().is_enabled());
        assert!(d.session().current_repository().is_some());
    }

    #[test]
    fn closed_buffers_dropped_from_both_sides() {
        let input = concat!(
            r#"{"type":"cwd_changed","cwd":"/repo"}"#, "\n",
            r#"{"type":"command","name":"enable"}"#, "\n",
            r#"{"type":"buffer_opened","buffer":{"id":1,"name":"/etc/hosts"}}"#, "\n",
            r#"{"type":"buffer_opened","buffer":{"id":2,"name":"/repo/a.txt"}}"#, "\n",
            r#"{"type":"buffer_closed","buffer":1}"#, "\n",
            r#"{"type":"buffer_closed","buffer":2}"#, "\n",
        );

        let mut d = dispatcher(false);
        let stats = serve(input.as_bytes(), &mut d).unwrap();
        assert_eq!(stats, ServeStats { events: 6, rejected: 0 });

        assert!(d.guard().is_empty());
        assert!(d.host_mut().buffer(BufferId(1)).unwrap().is_none());
        assert!(d.host_mut().buffer(BufferId(2)).unwrap().is_none());
    }

    #[test]
    fn enable_before_cwd_reports_nothing() {
        let input = "{\"type\":\"command\",\"name\":\"enable\"}\n";
        let mut d = dispatcher(false);
        serve(input.as_bytes(), &mut d).unwrap();

        assert!(d.session().current_repository().is_none());
        assert!(d.into_host().into_inner().is_empty());
    }

    #[test]
    fn notifications_truncated_to_width() {
        let mut host = StdioHost::new(Vec::new(), true);
        host.observe(&HostEvent::CwdChanged {
            cwd: PathBuf::from("/"),
            width: Some(20),
        });
        host.notify(&Notification::info("a rather long message indeed"))
            .unwrap();

        match &requests(&host.into_inner())[0] {
            HostRequest::Notify { message, .. } => {
                assert_eq!(message.chars().count(), 19);
                assert!(message.ends_with('…'));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn truncation_disabled() {
        let mut host = StdioHost::new(Vec::new(), false);
        host.observe(&HostEvent::CwdChanged {
            cwd: PathBuf::from("/"),
            width: Some(10),
        });
        host.notify(&Notification::info("a rather long message indeed"))
            .unwrap();

        match &requests(&host.into_inner())[0] {
            HostRequest::Notify { message, .. } => {
                assert_eq!(message, "corral: a rather long message indeed")
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn newer_focus_wins() {
        let mut host = StdioHost::new(Vec::new(), false);
        let a = Buffer::file(1, "/a").focused();
        let b = Buffer::file(2, "/b").focused();
        host.observe(&HostEvent::BufferOpened { buffer: a, width: None });
        host.observe(&HostEvent::BufferOpened { buffer: b, width: None });

        assert!(!host.buffer(BufferId(1)).unwrap().unwrap().focused);
        assert!(host.buffer(BufferId(2)).unwrap().unwrap().focused);
    }
}
