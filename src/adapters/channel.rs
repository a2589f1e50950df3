//! Channel-backed sink for streaming HTTP response bodies.
//!
//! The sender half is the sink, the receiver half is drained by the response
//! body. When the client goes away the server drops the body, which drops the
//! receiver; the sink sees that as a disconnect.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::SinkError;
use crate::traits::EventSink;

/// Event sink writing frames into a bounded channel.
///
/// Writes wait for channel capacity, so a slow client applies backpressure
/// to the sender instead of growing an unbounded queue.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    /// Wrap an existing channel sender.
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver its frames arrive on.
    ///
    /// A capacity of zero is raised to one.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Create a sink and the response body that streams its frames.
    pub fn pair(capacity: usize) -> (Self, Body) {
        let (sink, rx) = Self::channel(capacity);
        (sink, receiver_body(rx))
    }
}

/// Turn a frame receiver into a streaming response body.
///
/// The body ends once every sender is dropped.
pub fn receiver_body(rx: mpsc::Receiver<Bytes>) -> Body {
    let frames = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|frame| (Ok::<_, Infallible>(frame), rx))
    });
    Body::from_stream(frames)
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn write(&mut self, frame: Bytes) -> Result<(), SinkError> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| SinkError::Disconnected)
    }

    async fn closed(&mut self) {
        self.tx.closed().await
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_write_delivers_frame() {
        let (mut sink, mut rx) = ChannelSink::channel(4);
        sink.write(Bytes::from_static(b"data: hi\n\n")).await.unwrap();
        sink.flush().await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), Bytes::from_static(b"data: hi\n\n"));
    }

    #[tokio::test]
    async fn test_write_after_receiver_drop_is_disconnect() {
        let (mut sink, rx) = ChannelSink::channel(4);
        drop(rx);

        let err = sink.write(Bytes::from_static(b": 1\n\n")).await.unwrap_err();
        assert!(err.is_disconnect());
        assert!(sink.is_closed());
    }

    #[tokio::test]
    async fn test_closed_resolves_when_receiver_dropped() {
        let (mut sink, rx) = ChannelSink::channel(1);
        assert!(!sink.is_closed());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            drop(rx);
        });

        tokio::time::timeout(Duration::from_secs(1), sink.closed())
            .await
            .expect("closed() should resolve after the receiver is dropped");
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised() {
        let (mut sink, mut rx) = ChannelSink::channel(0);
        sink.write(Bytes::from_static(b"x")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), Bytes::from_static(b"x"));
    }

    #[tokio::test]
    async fn test_body_streams_frames_until_sender_dropped() {
        let (mut sink, body) = ChannelSink::pair(4);
        sink.write(Bytes::from_static(b"event: a\ndata: 1\n\n"))
            .await
            .unwrap();
        sink.write(Bytes::from_static(b"event: b\ndata: 2\n\n"))
            .await
            .unwrap();
        drop(sink);

        let collected = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(
            &collected[..],
            b"event: a\ndata: 1\n\nevent: b\ndata: 2\n\n"
        );
    }
}
