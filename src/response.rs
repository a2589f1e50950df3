//! HTTP response integration for `axum` handlers.
//!
//! Opens an event stream response (status and headers first, then frames as
//! they are sent) and reads the client's resume identifier.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use futures::Stream;

use crate::adapters::ChannelSink;
use crate::config::StreamConfig;
use crate::error::EventStreamResult;
use crate::event::Event;
use crate::keepalive::{run_event_loop, LoopOutcome};
use crate::stream::EventStream;

/// Media type of an event stream body.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Request header carrying the identifier of the last event a client saw.
pub const LAST_EVENT_ID_HEADER: &str = "last-event-id";

/// Open an event stream response.
///
/// The response carries the configured status, `Cache-Control: no-store`,
/// `Content-Type: text/event-stream` and `Connection: keep-alive`. When
/// `config.retry` is set the retry advice is queued before anything else.
/// Frames sent on the returned stream reach the client through the body.
///
/// # Example
///
/// ```ignore
/// async fn handler() -> Result<Response, AppError> {
///     let (response, mut stream) = event_stream_response(&StreamConfig::default()).await?;
///     tokio::spawn(async move {
///         let _ = stream.send_string("hello", "world").await;
///     });
///     Ok(response)
/// }
/// ```
pub async fn event_stream_response(
    config: &StreamConfig,
) -> EventStreamResult<(Response, EventStream<ChannelSink>)> {
    let (sink, body) = ChannelSink::pair(config.channel_capacity);
    let mut stream = EventStream::new(sink);
    if let Some(delay) = config.retry {
        stream.advise_retry(delay).await?;
    }

    let mut response = Response::new(body);
    *response.status_mut() = config.status;
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(EVENT_STREAM_CONTENT_TYPE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    Ok((response, stream))
}

/// Open an event stream response and forward `events` to it in a background task.
///
/// The task runs [`run_event_loop`] with the configured heartbeat and ends
/// when the source is exhausted or the client disconnects.
pub async fn spawn_event_stream<E>(config: &StreamConfig, events: E) -> EventStreamResult<Response>
where
    E: Stream<Item = Event> + Send + 'static,
{
    let (response, mut stream) = event_stream_response(config).await?;
    let heartbeat = config.heartbeat_interval;

    tokio::spawn(async move {
        match run_event_loop(&mut stream, events, heartbeat).await {
            LoopOutcome::Disconnected => {
                tracing::debug!("Event stream closed by client");
            }
            LoopOutcome::Exhausted => {
                tracing::debug!("Event stream source finished after {} frames", stream.frames_sent());
            }
            LoopOutcome::Failed(err) => {
                tracing::warn!("Event stream ended with error: {}", err);
            }
        }
    });

    Ok(response)
}

/// Read the `Last-Event-ID` request header.
///
/// Missing, empty or non-UTF-8 values yield `None`.
pub fn last_event_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(LAST_EVENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Extractor for the client's resume identifier.
///
/// Never rejects; a request without the header yields `LastEventId(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastEventId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for LastEventId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(LastEventId(last_event_id(&parts.headers)))
    }
}
