//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`EventSink`] - Output sink that frames are written and flushed to

pub mod sink;

pub use sink::EventSink;
