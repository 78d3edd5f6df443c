//! # EventStreamReader: chunked bytes in, parsed notifications out.
//!
//! The notification endpoint frames one event per `data:<JSON>` line, but
//! the network hands us arbitrary byte chunks: splits can land inside a
//! multi-byte character, inside the `data:` prefix, or inside the JSON body.
//! The reader turns that into an in-order sequence of [`Notification`]s.
//!
//! ## Algorithm
//! ```text
//! push(bytes):
//!   text   = utf8.decode(bytes)          (incomplete code point held inside)
//!   buffer = pending + text
//!   for each complete ('\n'-terminated) line in buffer:
//!     ├─ "data:" line → strip prefix, trim, parse JSON
//!     │     ├─ Ok  → emit immediately, consume line, continue
//!     │     └─ Err → keep this line and everything after it as pending,
//!     │              stop processing this chunk
//!     └─ other line  → framing noise (keep-alive, comment), discard
//!   the unterminated final fragment stays in pending
//! ```
//!
//! ## Rules
//! - Events are emitted **one at a time**, in line order, never batched.
//! - A JSON parse failure is read as "this line is not terminated yet",
//!   never as "corrupt": newline framing gives no other truncation signal.
//!   A line that never parses therefore accumulates into `pending` until
//!   the stream ends or the buffer cap clears it.
//! - `pending` is owned by one reader for one session and is discarded at
//!   stream end; nothing is carried across sessions.

use crate::events::Notification;
use crate::stream::Utf8Stream;

/// Marker for candidate event lines.
const EVENT_PREFIX: &str = "data:";

/// Reassembles `data:<JSON>` lines from arbitrarily chunked bytes.
///
/// Create one per streaming session; see the module docs for the algorithm.
#[derive(Debug)]
pub struct EventStreamReader {
    utf8: Utf8Stream,
    pending: String,
    pending_limit: Option<usize>,
}

impl EventStreamReader {
    /// Creates a reader with the given reassembly-buffer cap.
    ///
    /// `pending_limit` bounds how much unparseable data a session can
    /// accumulate (`None` = unbounded); see
    /// [`FeedConfig::pending_limit`](crate::FeedConfig::pending_limit).
    pub fn new(pending_limit: Option<usize>) -> Self {
        Self {
            utf8: Utf8Stream::new(),
            pending: String::new(),
            pending_limit,
        }
    }

    /// Feeds one network chunk, invoking `emit` for each fully parsed event.
    ///
    /// Events are emitted in line order, immediately as each line parses.
    pub fn push(&mut self, bytes: &[u8], emit: &mut dyn FnMut(Notification)) {
        let text = self.utf8.decode(bytes);
        self.pending.push_str(&text);
        self.drain_complete_lines(emit);

        if let Some(limit) = self.pending_limit {
            if self.pending.len() > limit {
                tracing::warn!(
                    dropped_bytes = self.pending.len(),
                    limit,
                    "reassembly buffer exceeded cap; dropping unparseable data"
                );
                self.pending.clear();
            }
        }
    }

    /// Ends the session, returning whatever never formed a complete event.
    ///
    /// An event whose line never closed before the stream ended is lost by
    /// contract, not buffered across sessions. The caller may log the
    /// remainder.
    pub fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending)
        }
    }

    fn drain_complete_lines(&mut self, emit: &mut dyn FnMut(Notification)) {
        loop {
            let Some(newline) = self.pending.find('\n') else {
                // Unterminated final fragment; wait for the next chunk.
                return;
            };
            let line = &self.pending[..newline];
            if let Some(body) = line.strip_prefix(EVENT_PREFIX) {
                match serde_json::from_str::<Notification>(body.trim()) {
                    Ok(event) => emit(event),
                    // The only available truncation signal: keep this line
                    // and every line after it, stop processing the chunk.
                    Err(_) => return,
                }
            }
            // Parsed event line or framing noise: consume through the newline.
            self.pending.drain(..=newline);
        }
    }
}
