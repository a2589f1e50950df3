//! Event value type.
//!
//! An `Event` is one message waiting to be framed: a name, an optional
//! identifier for client resumption and an opaque payload.

use bytes::Bytes;
use serde::Serialize;

use crate::frame;

/// One named event with an optional identifier.
///
/// The name and identifier are written into header lines without escaping;
/// they must not contain newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: Option<String>,
    name: String,
    data: Bytes,
}

impl Event {
    /// Create an event from a name and raw payload.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            id: None,
            name: name.into(),
            data: data.into(),
        }
    }

    /// Create an event whose payload is `data` serialized as JSON.
    ///
    /// # Errors
    /// Returns the serializer error; no event is produced.
    pub fn json<T: Serialize + ?Sized>(
        name: impl Into<String>,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        let payload = serde_json::to_vec(data)?;
        Ok(Self::new(name, payload))
    }

    /// Attach an identifier, written as the `id:` line.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Header lines for this event.
    pub fn prefix(&self) -> Bytes {
        match &self.id {
            Some(id) => frame::format_id_and_event(id, &self.name),
            None => frame::format_event(&self.name),
        }
    }

    /// The complete frame for this event.
    pub fn to_frame(&self) -> Bytes {
        frame::build_frame(&self.prefix(), &self.data)
    }
}
