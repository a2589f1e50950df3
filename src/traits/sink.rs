//! Output sink trait abstraction.
//!
//! Provides the capability interface the event sender writes frames through,
//! so framing never depends on a concrete transport.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SinkError;

/// Trait for an open, flushable event output.
///
/// One sink backs one connection and has exactly one writer. Implementations
/// include the channel-backed HTTP body sink, an `AsyncWrite` sink and a
/// recording mock for tests.
///
/// # Example
///
/// ```ignore
/// use eventstream::traits::EventSink;
///
/// async fn push<S: EventSink>(sink: &mut S, frame: Bytes) -> Result<(), SinkError> {
///     sink.write(frame).await?;
///     sink.flush().await
/// }
/// ```
#[async_trait]
pub trait EventSink: Send {
    /// Write one complete frame.
    ///
    /// # Errors
    /// `SinkError::Disconnected` once the consumer is gone, `SinkError::Io`
    /// for other transport failures.
    async fn write(&mut self, frame: Bytes) -> Result<(), SinkError>;

    /// Push buffered bytes to the consumer.
    ///
    /// Sinks without buffering keep the default no-op.
    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Resolve once the consumer has disconnected.
    ///
    /// Sinks that cannot observe the consumer never resolve; they report the
    /// disconnect through a failing `write` instead.
    async fn closed(&mut self) {
        futures::future::pending::<()>().await
    }

    /// Check whether the consumer is already known to be gone.
    fn is_closed(&self) -> bool {
        false
    }
}

#[async_trait]
impl<S: EventSink + ?Sized> EventSink for Box<S> {
    async fn write(&mut self, frame: Bytes) -> Result<(), SinkError> {
        (**self).write(frame).await
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush().await
    }

    async fn closed(&mut self) {
        (**self).closed().await
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
