//! Server-Sent Events message framing.
//!
//! Turns a prefix of header lines (`id:` / `event:`) and an arbitrary payload
//! into one complete protocol frame:
//! - every newline in the payload starts a new `data: ` line
//! - bytes below 0x20 other than newline are dropped
//! - the frame is terminated by a single blank line
//!
//! Everything here is pure. Nothing touches a sink, nothing can fail.

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

/// Marker written at the start of every data line.
pub const DATA_FIELD: &[u8] = b"data: ";

/// Blank-line terminator closing the last data line and the frame.
const TERMINATOR: &[u8] = b"\n\n";

/// Newline plus a full data marker, the cost of one extra data line.
const DATA_LINE_OVERHEAD: usize = DATA_FIELD.len() + 2;

/// Extra data lines the initial buffer has room for.
const GUESS_LINE_COUNT: usize = 8;

/// Extra capacity reserved up front and on every growth step.
pub(crate) const GROWTH_CHUNK: usize = GUESS_LINE_COUNT * DATA_LINE_OVERHEAD;

/// Build a complete frame from `prefix` header lines and a raw `payload`.
///
/// The prefix is copied verbatim. The payload is split on `\n` into data
/// lines, one per segment, so an empty payload yields one empty data line and
/// a payload ending in `\n` yields a trailing empty data line. The result
/// always ends with exactly `\n\n`.
///
/// # Example
///
/// ```
/// use eventstream::frame::build_frame;
///
/// let frame = build_frame(b"id: 123\n", b"a\nb");
/// assert_eq!(&frame[..], b"id: 123\ndata: a\ndata: b\n\n");
/// ```
pub fn build_frame(prefix: &[u8], payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(prefix.len() + payload.len() + GROWTH_CHUNK);
    buf.extend_from_slice(prefix);
    buf.extend_from_slice(DATA_FIELD);

    // Plain bytes are copied a run at a time; only control bytes end a run.
    let mut run_start = 0;
    for (idx, &byte) in payload.iter().enumerate() {
        if byte >= 0x20 {
            continue;
        }
        push_run(&mut buf, &payload[run_start..idx]);
        run_start = idx + 1;
        if byte == b'\n' {
            ensure_capacity(&mut buf, DATA_LINE_OVERHEAD);
            buf.put_u8(b'\n');
            buf.extend_from_slice(DATA_FIELD);
        }
    }
    push_run(&mut buf, &payload[run_start..]);

    ensure_capacity(&mut buf, TERMINATOR.len());
    buf.extend_from_slice(TERMINATOR);
    buf.freeze()
}

fn push_run(buf: &mut BytesMut, run: &[u8]) {
    if run.is_empty() {
        return;
    }
    ensure_capacity(buf, run.len());
    buf.extend_from_slice(run);
}

/// Grow by whole chunks so a payload full of newlines does not reallocate
/// once per line.
fn ensure_capacity(buf: &mut BytesMut, additional: usize) {
    let spare = buf.capacity() - buf.len();
    if spare < additional {
        buf.reserve(additional.max(GROWTH_CHUNK));
    }
}

/// Header lines for an event carrying an identifier.
///
/// Neither value is escaped; callers must not pass newlines.
pub fn format_id_and_event(id: &str, event_name: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(id.len() + event_name.len() + 13);
    buf.extend_from_slice(b"id: ");
    buf.extend_from_slice(id.as_bytes());
    buf.extend_from_slice(b"\nevent: ");
    buf.extend_from_slice(event_name.as_bytes());
    buf.put_u8(b'\n');
    buf.freeze()
}

/// Header line naming the event.
pub fn format_event(event_name: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(event_name.len() + 8);
    buf.extend_from_slice(b"event: ");
    buf.extend_from_slice(event_name.as_bytes());
    buf.put_u8(b'\n');
    buf.freeze()
}

/// `retry:` control message advising the client's reconnection delay.
///
/// Sub-millisecond durations are clamped to 1 ms.
pub fn retry_advice(delay: Duration) -> Bytes {
    let millis = delay.as_millis().max(1);
    Bytes::from(format!("retry: {}\n\n", millis))
}

/// Comment message carrying a nanosecond timestamp, used as a keep-alive.
pub fn heartbeat_comment(timestamp_nanos: i64) -> Bytes {
    Bytes::from(format!(": {}\n\n", timestamp_nanos))
}
