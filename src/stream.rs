//! Per-connection event sender.
//!
//! `EventStream` frames events and writes each frame to its sink, flushing
//! after every write. The first failed write or flush closes the stream:
//! later sends are refused with `EventStreamError::Closed` and never reach
//! the sink again.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;

use crate::error::{EventStreamError, EventStreamResult};
use crate::event::Event;
use crate::frame;
use crate::traits::EventSink;

/// Server-sent event sender bound to one output sink.
///
/// Every send takes `&mut self`, so a stream has exactly one writer.
///
/// # Example
///
/// ```ignore
/// use eventstream::adapters::ChannelSink;
/// use eventstream::stream::EventStream;
///
/// let (sink, body) = ChannelSink::pair(16);
/// let mut stream = EventStream::new(sink);
/// stream.advise_retry(Duration::from_secs(5)).await?;
/// stream.send_json("status", &status).await?;
/// ```
#[derive(Debug)]
pub struct EventStream<S> {
    sink: S,
    closed: bool,
    frames_sent: u64,
}

impl<S: EventSink> EventStream<S> {
    /// Create a sender writing to `sink`.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            closed: false,
            frames_sent: 0,
        }
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Check whether the stream failed or the consumer is known to be gone.
    pub fn is_closed(&self) -> bool {
        self.closed || self.sink.is_closed()
    }

    /// Number of frames written and flushed successfully.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Resolve once the consumer disconnects (immediately if already closed).
    pub async fn closed(&mut self) {
        if self.closed {
            return;
        }
        self.sink.closed().await
    }

    /// Advise the client how long to wait before reconnecting.
    pub async fn advise_retry(&mut self, delay: Duration) -> EventStreamResult<()> {
        self.write_frame(frame::retry_advice(delay)).await
    }

    /// Send a comment carrying the current time in nanoseconds.
    pub async fn heartbeat(&mut self) -> EventStreamResult<()> {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        self.write_frame(frame::heartbeat_comment(nanos)).await
    }

    /// Send a named event with a string payload.
    pub async fn send_string(&mut self, event_name: &str, data: &str) -> EventStreamResult<()> {
        let frame = frame::build_frame(&frame::format_event(event_name), data.as_bytes());
        self.write_frame(frame).await
    }

    /// Send a named event with an identifier and a string payload.
    pub async fn send_string_with_id(
        &mut self,
        id: &str,
        event_name: &str,
        data: &str,
    ) -> EventStreamResult<()> {
        let prefix = frame::format_id_and_event(id, event_name);
        self.write_frame(frame::build_frame(&prefix, data.as_bytes()))
            .await
    }

    /// Send a named event whose payload is `data` serialized as JSON.
    ///
    /// Serialization happens before anything is written; on failure the sink
    /// is untouched and the stream stays open.
    pub async fn send_json<T: Serialize + ?Sized>(
        &mut self,
        event_name: &str,
        data: &T,
    ) -> EventStreamResult<()> {
        let payload = serde_json::to_vec(data)?;
        let frame = frame::build_frame(&frame::format_event(event_name), &payload);
        self.write_frame(frame).await
    }

    /// Send a named event with an identifier and a JSON payload.
    pub async fn send_json_with_id<T: Serialize + ?Sized>(
        &mut self,
        id: &str,
        event_name: &str,
        data: &T,
    ) -> EventStreamResult<()> {
        let payload = serde_json::to_vec(data)?;
        let prefix = frame::format_id_and_event(id, event_name);
        self.write_frame(frame::build_frame(&prefix, &payload)).await
    }

    /// Send a prepared [`Event`].
    pub async fn send_event(&mut self, event: &Event) -> EventStreamResult<()> {
        self.write_frame(event.to_frame()).await
    }

    async fn write_frame(&mut self, frame: Bytes) -> EventStreamResult<()> {
        if self.closed {
            return Err(EventStreamError::Closed);
        }

        let result = match self.sink.write(frame).await {
            Ok(()) => self.sink.flush().await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.frames_sent += 1;
                Ok(())
            }
            Err(err) => {
                self.closed = true;
                if err.is_disconnect() {
                    tracing::debug!(
                        "Event stream consumer disconnected after {} frames",
                        self.frames_sent
                    );
                } else {
                    tracing::warn!("Event stream write failed, closing stream: {}", err);
                }
                Err(err.into())
            }
        }
    }
}
