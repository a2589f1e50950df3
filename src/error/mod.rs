//! Error types for event stream delivery.
//!
//! Framing itself cannot fail. Everything that can go wrong happens around
//! it:
//!
//! - **Sink Errors**: `SinkError` from writing or flushing the output sink
//! - **Stream Errors**: `EventStreamError` for a send operation, wrapping sink
//!   failures, payload serialization failures and sends on a closed stream
//! - **Result Type Alias**: `EventStreamResult<T>`
//!
//! # Example
//!
//! ```ignore
//! use eventstream::error::EventStreamResult;
//!
//! async fn push(stream: &mut EventStream<ChannelSink>) -> EventStreamResult<()> {
//!     match stream.send_string("tick", "1").await {
//!         Err(err) if err.is_disconnect() => Ok(()),
//!         other => other,
//!     }
//! }
//! ```

mod result;
mod sink;
mod stream;

pub use result::EventStreamResult;
pub use sink::SinkError;
pub use stream::EventStreamError;
