//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ChannelSink`] - Sink feeding an `axum` streaming response body
//! - [`WriterSink`] - Sink over any `tokio::io::AsyncWrite`
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockSink`] - Recording sink with injectable failures

pub mod channel;
pub mod mock;
pub mod writer;

pub use channel::{receiver_body, ChannelSink};
pub use mock::MockSink;
pub use writer::WriterSink;
