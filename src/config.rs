//! Event stream configuration.
//!
//! Settings applied when an event stream response is opened and while its
//! send loop runs.

use std::time::Duration;

use axum::http::StatusCode;

/// Default heartbeat period; keeps idle proxies from closing the connection.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Default number of frames buffered between sender and response body.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Configuration for one event stream response.
///
/// Use the builder pattern to customize behavior.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use eventstream::config::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_retry(Duration::from_secs(5))
///     .with_heartbeat_interval(Duration::from_secs(2));
/// assert_eq!(config.retry, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Reconnection delay advised to the client before the first event
    pub retry: Option<Duration>,
    /// Heartbeat comment period (None disables heartbeats)
    pub heartbeat_interval: Option<Duration>,
    /// Frames buffered between the sender and the response body (min 1)
    pub channel_capacity: usize,
    /// Status code written before the first event (default: 200)
    pub status: StatusCode,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            retry: None,
            heartbeat_interval: Some(DEFAULT_HEARTBEAT_INTERVAL),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            status: StatusCode::OK,
        }
    }
}

impl StreamConfig {
    /// Create a new StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advise the client to wait `delay` before reconnecting.
    pub fn with_retry(mut self, delay: Duration) -> Self {
        self.retry = Some(delay);
        self
    }

    /// Set the heartbeat period.
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = Some(interval);
        self
    }

    /// Turn heartbeats off.
    pub fn without_heartbeat(mut self) -> Self {
        self.heartbeat_interval = None;
        self
    }

    /// Set the channel capacity between sender and response body.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the response status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.retry, None);
        assert_eq!(config.heartbeat_interval, Some(DEFAULT_HEARTBEAT_INTERVAL));
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.status, StatusCode::OK);
    }

    #[test]
    fn test_builder_chain() {
        let config = StreamConfig::new()
            .with_retry(Duration::from_millis(1500))
            .without_heartbeat()
            .with_channel_capacity(2)
            .with_status(StatusCode::ACCEPTED);

        assert_eq!(config.retry, Some(Duration::from_millis(1500)));
        assert_eq!(config.heartbeat_interval, None);
        assert_eq!(config.channel_capacity, 2);
        assert_eq!(config.status, StatusCode::ACCEPTED);
    }

    #[test]
    fn test_heartbeat_can_be_reenabled() {
        let config = StreamConfig::new()
            .without_heartbeat()
            .with_heartbeat_interval(Duration::from_secs(1));
        assert_eq!(config.heartbeat_interval, Some(Duration::from_secs(1)));
    }
}
