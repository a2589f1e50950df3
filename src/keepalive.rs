//! Cancellation-aware send loop.
//!
//! Forwards a stream of events to one `EventStream`, interleaving heartbeat
//! comments, until the source ends or the consumer goes away. A disconnect is
//! the normal way for a stream to end and is never reported as an error.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::error::EventStreamError;
use crate::event::Event;
use crate::stream::EventStream;
use crate::traits::EventSink;

/// How a send loop ended.
#[derive(Debug)]
pub enum LoopOutcome {
    /// The consumer disconnected.
    Disconnected,
    /// The event source ran out.
    Exhausted,
    /// The sink failed for a reason other than a disconnect.
    Failed(EventStreamError),
}

enum Step {
    Disconnected,
    Exhausted,
    Event(Event),
    Heartbeat,
}

/// Forward `events` to `stream` until the source ends or the consumer leaves.
///
/// With `heartbeat` set, a comment is sent every period; the first one goes
/// out one period after the loop starts. The disconnect signal is checked
/// before each event so nothing is sent to a consumer known to be gone.
pub async fn run_event_loop<S, E>(
    stream: &mut EventStream<S>,
    events: E,
    heartbeat: Option<Duration>,
) -> LoopOutcome
where
    S: EventSink,
    E: Stream<Item = Event>,
{
    futures::pin_mut!(events);
    let mut ticker = heartbeat.map(heartbeat_ticker);

    loop {
        let step = tokio::select! {
            biased;
            _ = stream.closed() => Step::Disconnected,
            next = events.next() => match next {
                Some(event) => Step::Event(event),
                None => Step::Exhausted,
            },
            _ = next_tick(&mut ticker) => Step::Heartbeat,
        };

        let result = match step {
            Step::Disconnected => {
                tracing::debug!(
                    "Event stream consumer left after {} frames",
                    stream.frames_sent()
                );
                return LoopOutcome::Disconnected;
            }
            Step::Exhausted => return LoopOutcome::Exhausted,
            Step::Event(event) => stream.send_event(&event).await,
            Step::Heartbeat => stream.heartbeat().await,
        };

        if let Err(err) = result {
            if err.is_disconnect() {
                return LoopOutcome::Disconnected;
            }
            tracing::warn!("Event stream send loop stopped [{}]: {}", err.error_code(), err);
            return LoopOutcome::Failed(err);
        }
    }
}

fn heartbeat_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => futures::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ChannelSink, MockSink};
    use std::io;

    #[tokio::test]
    async fn test_forwards_all_events_then_exhausts() {
        let sink = MockSink::new();
        let mut stream = EventStream::new(sink.clone());
        let events = futures::stream::iter(vec![
            Event::new("a", "1"),
            Event::new("b", "2").with_id("2"),
        ]);

        let outcome = run_event_loop(&mut stream, events, None).await;

        assert!(matches!(outcome, LoopOutcome::Exhausted));
        assert_eq!(
            sink.written_string(),
            "event: a\ndata: 1\n\nid: 2\nevent: b\ndata: 2\n\n"
        );
    }

    #[tokio::test]
    async fn test_stops_on_disconnect_signal() {
        let sink = MockSink::new();
        let mut stream = EventStream::new(sink.clone());

        let handle = sink.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.disconnect();
        });

        let outcome = tokio::time::timeout(
            Duration::from_secs(2),
            run_event_loop(&mut stream, futures::stream::pending::<Event>(), None),
        )
        .await
        .expect("loop should end once the consumer disconnects");

        assert!(matches!(outcome, LoopOutcome::Disconnected));
        assert!(sink.frames().is_empty());
    }

    #[tokio::test]
    async fn test_heartbeats_while_idle() {
        let sink = MockSink::new();
        let mut stream = EventStream::new(sink.clone());

        let _ = tokio::time::timeout(
            Duration::from_millis(120),
            run_event_loop(
                &mut stream,
                futures::stream::pending::<Event>(),
                Some(Duration::from_millis(20)),
            ),
        )
        .await;

        let frames = sink.frames();
        assert!(!frames.is_empty());
        assert!(frames
            .iter()
            .all(|f| f.starts_with(b": ") && f.ends_with(b"\n\n")));
    }

    #[tokio::test]
    async fn test_receiver_drop_ends_loop() {
        let (sink, rx) = ChannelSink::channel(1);
        let mut stream = EventStream::new(sink);
        drop(rx);

        let events = futures::stream::iter(vec![Event::new("a", "1")]);
        let outcome = run_event_loop(&mut stream, events, None).await;

        assert!(matches!(outcome, LoopOutcome::Disconnected));
        assert_eq!(stream.frames_sent(), 0);
    }

    #[tokio::test]
    async fn test_write_error_is_reported() {
        let sink = MockSink::new();
        sink.fail_writes(io::ErrorKind::PermissionDenied);
        let mut stream = EventStream::new(sink.clone());

        let events = futures::stream::iter(vec![Event::new("a", "1"), Event::new("b", "2")]);
        let outcome = run_event_loop(&mut stream, events, None).await;

        match outcome {
            LoopOutcome::Failed(err) => assert_eq!(err.error_code(), "E_STREAM_IO"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_write_disconnect_is_not_failure() {
        let sink = MockSink::new();
        sink.fail_writes(io::ErrorKind::ConnectionReset);
        let mut stream = EventStream::new(sink.clone());

        let events = futures::stream::iter(vec![Event::new("a", "1")]);
        let outcome = run_event_loop(&mut stream, events, None).await;

        assert!(matches!(outcome, LoopOutcome::Disconnected));
    }
}
