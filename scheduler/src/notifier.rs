//! Completion notification.
//!
//! When a process reaches its burst time the scheduler sends a fixed-format
//! message to the endpoint the process registered with. Delivery problems
//! are reported back to the caller, which logs them and moves on.

use std::collections::HashMap;
use std::io::Write;

use crate::{Endpoint, NotifyError, Pid, Timestamp};

/// Request code meaning "process finished"
pub const PROCESS_REQUEST_DONE: i32 = 1;

/// The completion message, sent as three little-endian fields:
/// pid (i32), request (i32), time in milliseconds (u32)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionMessage {
    pub pid: i32,
    pub request: i32,
    pub time_ms: u32,
}

impl CompletionMessage {
    /// Size of the encoded message
    pub const SIZE: usize = 12;

    /// Creates the message announcing that `pid` finished at `now`
    pub fn done(pid: Pid, now: Timestamp) -> CompletionMessage {
        CompletionMessage {
            pid: pid.get(),
            request: PROCESS_REQUEST_DONE,
            time_ms: now.get(),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.pid.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.request.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.time_ms.to_le_bytes());
        bytes
    }

    /// Decodes a message, or returns `None` if `bytes` is too short
    pub fn from_bytes(bytes: &[u8]) -> Option<CompletionMessage> {
        if bytes.len() < Self::SIZE {
            return None;
        }

        let field = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];

        Some(CompletionMessage {
            pid: i32::from_le_bytes(field(0)),
            request: i32::from_le_bytes(field(4)),
            time_ms: u32::from_le_bytes(field(8)),
        })
    }
}

/// Delivers completion messages to process endpoints
pub trait CompletionNotifier {
    /// Sends `message` to `endpoint`
    ///
    /// The message must arrive whole; a partial delivery is an error.
    fn notify(&mut self, endpoint: Endpoint, message: &CompletionMessage) -> Result<(), NotifyError>;
}

/// Notifier writing encoded messages into one writer per endpoint
pub struct WriterNotifier<W: Write> {
    endpoints: HashMap<Endpoint, W>,
}

impl<W: Write> WriterNotifier<W> {
    pub fn new() -> WriterNotifier<W> {
        WriterNotifier { endpoints: HashMap::new() }
    }

    /// Attaches `writer` to `endpoint`, returning the writer it replaces
    pub fn connect(&mut self, endpoint: Endpoint, writer: W) -> Option<W> {
        self.endpoints.insert(endpoint, writer)
    }

    pub fn writer(&self, endpoint: Endpoint) -> Option<&W> {
        self.endpoints.get(&endpoint)
    }
}

impl<W: Write> Default for WriterNotifier<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> CompletionNotifier for WriterNotifier<W> {
    fn notify(&mut self, endpoint: Endpoint, message: &CompletionMessage) -> Result<(), NotifyError> {
        let writer = self
            .endpoints
            .get_mut(&endpoint)
            .ok_or(NotifyError::UnknownEndpoint(endpoint))?;

        let bytes = message.to_bytes();
        let written = writer.write(&bytes)?;
        if written != bytes.len() {
            return Err(NotifyError::ShortWrite { written, expected: bytes.len() });
        }

        writer.flush()?;
        Ok(())
    }
}

/// Notifier that keeps every message it was asked to deliver
///
/// Endpoints marked with [`RecordingNotifier::fail_on`] reject their
/// messages, which makes it handy for exercising the failure path.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Vec<(Endpoint, CompletionMessage)>,
    failing: Vec<Endpoint>,
    failures: usize,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier::default()
    }

    /// Makes every delivery to `endpoint` fail with a short write
    pub fn fail_on(&mut self, endpoint: Endpoint) {
        self.failing.push(endpoint);
    }

    /// Delivered messages, in delivery order
    pub fn delivered(&self) -> &[(Endpoint, CompletionMessage)] {
        &self.delivered
    }

    /// Number of deliveries that were rejected
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Completion time of `pid`, if its message got through
    pub fn completion_of(&self, pid: Pid) -> Option<Timestamp> {
        self.delivered
            .iter()
            .find(|(_, message)| message.pid == pid.get())
            .map(|(_, message)| Timestamp::new(message.time_ms))
    }
}

impl CompletionNotifier for RecordingNotifier {
    fn notify(&mut self, endpoint: Endpoint, message: &CompletionMessage) -> Result<(), NotifyError> {
        if self.failing.contains(&endpoint) {
            self.failures += 1;
            return Err(NotifyError::ShortWrite { written: 0, expected: CompletionMessage::SIZE });
        }

        self.delivered.push((endpoint, *message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    /// Writer that accepts at most `limit` bytes per call
    struct Choked {
        limit: usize,
        data: Vec<u8>,
    }

    impl Write for Choked {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn message_layout_is_pid_request_time() {
        let message = CompletionMessage::done(Pid::new(2), Timestamp::new(800));
        let bytes = message.to_bytes();

        assert_eq!(&bytes[0..4], &2i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &PROCESS_REQUEST_DONE.to_le_bytes());
        assert_eq!(&bytes[8..12], &800u32.to_le_bytes());
        assert_eq!(CompletionMessage::from_bytes(&bytes), Some(message));
        assert_eq!(CompletionMessage::from_bytes(&bytes[..11]), None);
    }

    #[test]
    fn writer_notifier_delivers_whole_messages() {
        let endpoint = Endpoint::new(4);
        let mut notifier: WriterNotifier<Vec<u8>> = WriterNotifier::new();
        notifier.connect(endpoint, Vec::new());

        let message = CompletionMessage::done(Pid::new(1), Timestamp::new(1500));
        notifier.notify(endpoint, &message).unwrap();

        let written = notifier.writer(endpoint).unwrap();
        assert_eq!(written.len(), CompletionMessage::SIZE);
        assert_eq!(CompletionMessage::from_bytes(written), Some(message));
    }

    #[test]
    fn short_write_is_reported() {
        let endpoint = Endpoint::new(5);
        let mut notifier = WriterNotifier::new();
        notifier.connect(endpoint, Choked { limit: 5, data: Vec::new() });

        let result = notifier.notify(endpoint, &CompletionMessage::done(Pid::new(1), Timestamp::new(0)));

        match result {
            Err(NotifyError::ShortWrite { written, expected }) => {
                assert_eq!(written, 5);
                assert_eq!(expected, CompletionMessage::SIZE);
            }
            other => panic!("expected a short write, got {:?}", other),
        }
    }

    #[test]
    fn unknown_endpoint_is_reported() {
        let mut notifier: WriterNotifier<Vec<u8>> = WriterNotifier::new();

        let result = notifier.notify(Endpoint::new(1), &CompletionMessage::done(Pid::new(1), Timestamp::new(0)));

        assert!(matches!(result, Err(NotifyError::UnknownEndpoint(_))));
    }

    #[test]
    fn recording_notifier_can_fail_selected_endpoints() {
        let mut notifier = RecordingNotifier::new();
        notifier.fail_on(Endpoint::new(2));

        let ok = CompletionMessage::done(Pid::new(1), Timestamp::new(100));
        let lost = CompletionMessage::done(Pid::new(2), Timestamp::new(200));
        assert!(notifier.notify(Endpoint::new(1), &ok).is_ok());
        assert!(notifier.notify(Endpoint::new(2), &lost).is_err());

        assert_eq!(notifier.delivered().len(), 1);
        assert_eq!(notifier.failures(), 1);
        assert_eq!(notifier.completion_of(Pid::new(1)), Some(Timestamp::new(100)));
        assert_eq!(notifier.completion_of(Pid::new(2)), None);
    }
}
