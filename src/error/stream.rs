//! Event send error types.
//!
//! This module defines errors returned by the per-connection event sender.

use std::fmt;

use super::sink::SinkError;

/// Errors from sending an event, retry advice or heartbeat.
#[derive(Debug)]
pub enum EventStreamError {
    /// Structured payload could not be serialized. Nothing was written.
    Serialize(serde_json::Error),

    /// Writing or flushing the sink failed. The stream is closed afterwards.
    Sink(SinkError),

    /// The stream already failed once; later sends are refused.
    Closed,
}

impl EventStreamError {
    /// Check if the consumer is gone and the send loop should stop quietly.
    pub fn is_disconnect(&self) -> bool {
        match self {
            EventStreamError::Sink(err) => err.is_disconnect(),
            EventStreamError::Closed => true,
            EventStreamError::Serialize(_) => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            EventStreamError::Serialize(_) => "E_STREAM_SERIALIZE",
            EventStreamError::Sink(SinkError::Disconnected) => "E_STREAM_DISCONNECTED",
            EventStreamError::Sink(SinkError::Io(_)) => "E_STREAM_IO",
            EventStreamError::Closed => "E_STREAM_CLOSED",
        }
    }
}

impl fmt::Display for EventStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStreamError::Serialize(err) => {
                write!(f, "Failed to serialize event payload: {}", err)
            }
            EventStreamError::Sink(err) => write!(f, "Event sink failed: {}", err),
            EventStreamError::Closed => write!(f, "Event stream is closed"),
        }
    }
}

impl std::error::Error for EventStreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventStreamError::Serialize(err) => Some(err),
            EventStreamError::Sink(err) => Some(err),
            EventStreamError::Closed => None,
        }
    }
}

impl From<SinkError> for EventStreamError {
    fn from(err: SinkError) -> Self {
        EventStreamError::Sink(err)
    }
}

impl From<serde_json::Error> for EventStreamError {
    fn from(err: serde_json::Error) -> Self {
        EventStreamError::Serialize(err)
    }
}

impl From<std::io::Error> for EventStreamError {
    fn from(err: std::io::Error) -> Self {
        EventStreamError::Sink(SinkError::from(err))
    }
}
