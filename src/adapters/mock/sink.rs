//! Mock event sink for testing.
//!
//! Records every frame and flush, and can be told to fail writes or flushes
//! or to behave as if the consumer disconnected.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use crate::error::SinkError;
use crate::traits::EventSink;

#[derive(Debug, Default)]
struct MockSinkState {
    frames: Vec<Bytes>,
    flushes: usize,
    write_error: Option<io::ErrorKind>,
    flush_error: Option<io::ErrorKind>,
    disconnected: bool,
}

/// Mock event sink for testing.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the stream under test owns another.
///
/// # Example
///
/// ```ignore
/// use eventstream::adapters::MockSink;
/// use eventstream::stream::EventStream;
///
/// let sink = MockSink::new();
/// let mut stream = EventStream::new(sink.clone());
/// stream.send_string("greeting", "hi").await?;
///
/// assert_eq!(sink.written_string(), "event: greeting\ndata: hi\n\n");
/// assert_eq!(sink.flush_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    state: Arc<Mutex<MockSinkState>>,
    notify: Arc<Notify>,
}

impl MockSink {
    /// Create a new mock sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded frames in write order.
    pub fn frames(&self) -> Vec<Bytes> {
        self.state.lock().unwrap().frames.clone()
    }

    /// Get every recorded byte concatenated.
    pub fn written(&self) -> Vec<u8> {
        let state = self.state.lock().unwrap();
        state.frames.iter().flat_map(|f| f.iter().copied()).collect()
    }

    /// Get every recorded byte as a (lossy) string.
    pub fn written_string(&self) -> String {
        String::from_utf8_lossy(&self.written()).into_owned()
    }

    /// Get the number of successful flushes.
    pub fn flush_count(&self) -> usize {
        self.state.lock().unwrap().flushes
    }

    /// Make every following write fail with the given I/O error kind.
    pub fn fail_writes(&self, kind: io::ErrorKind) {
        self.state.lock().unwrap().write_error = Some(kind);
    }

    /// Make every following flush fail with the given I/O error kind.
    pub fn fail_flushes(&self, kind: io::ErrorKind) {
        self.state.lock().unwrap().flush_error = Some(kind);
    }

    /// Simulate the consumer going away.
    pub fn disconnect(&self) {
        self.state.lock().unwrap().disconnected = true;
        self.notify.notify_waiters();
    }

    /// Clear recorded frames and flushes, keeping failure settings.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.frames.clear();
        state.flushes = 0;
    }
}

#[async_trait]
impl EventSink for MockSink {
    async fn write(&mut self, frame: Bytes) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap();
        if state.disconnected {
            return Err(SinkError::Disconnected);
        }
        if let Some(kind) = state.write_error {
            return Err(io::Error::new(kind, "mock write failure").into());
        }
        state.frames.push(frame);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap();
        if state.disconnected {
            return Err(SinkError::Disconnected);
        }
        if let Some(kind) = state.flush_error {
            return Err(io::Error::new(kind, "mock flush failure").into());
        }
        state.flushes += 1;
        Ok(())
    }

    async fn closed(&mut self) {
        loop {
            // Register before checking so a disconnect in between is not missed.
            let notified = self.notify.notified();
            if self.is_closed() {
                return;
            }
            notified.await;
        }
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap().disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_records_frames_and_flushes() {
        let mut sink = MockSink::new();
        let inspect = sink.clone();

        sink.write(Bytes::from_static(b"a")).await.unwrap();
        sink.write(Bytes::from_static(b"b")).await.unwrap();
        sink.flush().await.unwrap();

        assert_eq!(inspect.frames().len(), 2);
        assert_eq!(inspect.written(), b"ab");
        assert_eq!(inspect.flush_count(), 1);

        inspect.clear();
        assert!(inspect.frames().is_empty());
        assert_eq!(inspect.flush_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let mut sink = MockSink::new();
        sink.fail_writes(io::ErrorKind::PermissionDenied);

        let err = sink.write(Bytes::from_static(b"x")).await.unwrap_err();
        assert!(!err.is_disconnect());
        assert!(sink.frames().is_empty());
    }

    #[tokio::test]
    async fn test_injected_flush_failure() {
        let mut sink = MockSink::new();
        sink.fail_flushes(io::ErrorKind::BrokenPipe);

        sink.write(Bytes::from_static(b"x")).await.unwrap();
        let err = sink.flush().await.unwrap_err();
        assert!(err.is_disconnect());
    }

    #[tokio::test]
    async fn test_disconnect_wakes_closed() {
        let mut sink = MockSink::new();
        let handle = sink.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.disconnect();
        });

        tokio::time::timeout(Duration::from_secs(1), sink.closed())
            .await
            .expect("closed() should resolve after disconnect");
        assert!(sink.is_closed());
        assert!(sink.write(Bytes::from_static(b"x")).await.is_err());
    }
}
