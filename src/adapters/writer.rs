//! Sink over a raw async byte writer.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::SinkError;
use crate::traits::EventSink;

/// Event sink writing frames to any [`AsyncWrite`] (TCP stream, pipe, file).
///
/// Peer-gone I/O errors surface as `SinkError::Disconnected`.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> EventSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, frame: Bytes) -> Result<(), SinkError> {
        self.writer.write_all(&frame).await.map_err(SinkError::from)
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().await.map_err(SinkError::from)
    }
}
