//! Output sink error type.

use std::io;

use thiserror::Error;

/// Failure writing to or flushing an output sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The consumer went away (client closed the connection, receiver dropped).
    #[error("event stream consumer disconnected")]
    Disconnected,

    /// Any other I/O failure on the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl SinkError {
    /// Check if this error means the consumer is gone.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, SinkError::Disconnected)
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::WriteZero => SinkError::Disconnected,
            _ => SinkError::Io(err),
        }
    }
}
