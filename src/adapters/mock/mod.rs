//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockSink`] - Event sink recording every frame and flush

pub mod sink;

pub use sink::MockSink;
