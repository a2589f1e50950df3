//! Server-Sent Events framing and per-connection event delivery.
//!
//! - [`frame`] turns header lines and an arbitrary payload into a protocol
//!   frame
//! - [`stream::EventStream`] sends string, JSON, retry and heartbeat frames
//!   through an [`traits::EventSink`]
//! - [`keepalive::run_event_loop`] forwards events with heartbeats until the
//!   client disconnects
//! - [`response`] wires it all into an `axum` streaming response
//!
//! # Example
//!
//! ```ignore
//! use eventstream::{spawn_event_stream, Event, LastEventId, StreamConfig};
//!
//! async fn events(LastEventId(resume): LastEventId) -> Response {
//!     let config = StreamConfig::default().with_retry(Duration::from_secs(5));
//!     let events = futures::stream::iter(vec![Event::new("hello", "world")]);
//!     spawn_event_stream(&config, events)
//!         .await
//!         .unwrap_or_else(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response())
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod keepalive;
pub mod response;
pub mod stream;
pub mod traits;

pub use config::StreamConfig;
pub use error::{EventStreamError, EventStreamResult, SinkError};
pub use event::Event;
pub use frame::{build_frame, format_event, format_id_and_event};
pub use keepalive::{run_event_loop, LoopOutcome};
pub use response::{event_stream_response, last_event_id, spawn_event_stream, LastEventId};
pub use stream::EventStream;
pub use traits::EventSink;
