//! Result type alias for event stream operations.

use super::stream::EventStreamError;

/// Type alias for Results using EventStreamError.
///
/// # Example
///
/// ```ignore
/// use eventstream::error::EventStreamResult;
///
/// async fn greet(stream: &mut EventStream<ChannelSink>) -> EventStreamResult<()> {
///     stream.send_string("greeting", "hello").await
/// }
/// ```
pub type EventStreamResult<T> = Result<T, EventStreamError>;
