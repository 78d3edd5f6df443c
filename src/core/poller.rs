//! # NotificationLoop: one streaming session at a time, forever.
//!
//! Keeps exactly one streaming session active per hub, restarts on a fixed
//! cadence, and never lets a failed or hung attempt prevent future ones.
//!
//! ## State machine
//! ```text
//! Idle ──(tick)──► Active ──(stream end / open error / read error)──► Idle
//!                    │
//!                    └─ per parsed event: cursor.set(id)
//!                                         hub.latest = event
//!                                         hub.notifications.emit()
//!
//! loop {
//!   ├─► wait for tick (ticks landing while Active are skipped)
//!   ├─► open(cursor) ── Err ──► log, back to Idle
//!   ├─► read chunks, feeding EventStreamReader
//!   │       ├─ chunk Ok   → emit parsed events via hub.deliver()
//!   │       ├─ chunk Err  → log, back to Idle
//!   │       └─ stream end → discard pending, back to Idle
//!   └─► repeat (no backoff, no retry cap)
//! }
//! ```
//!
//! ## Rules
//! - Sessions run **sequentially**; the loop owns one task, so overlap is
//!   structurally impossible (at-most-one, not at-most-one-ever).
//! - Clean end, open failure, and read failure are handled identically:
//!   log and retry at the next tick. A permanently unreachable server is
//!   re-attempted at the fixed rate, forever.
//! - Cancellation is checked at the suspension points only: while idle,
//!   while opening, and between chunk reads. Never mid-chunk.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::FeedConfig;
use crate::error::TransportError;
use crate::stream::{EventStreamReader, NotificationTransport};
use crate::workspace::WorkspaceHub;

/// How one streaming session ended.
///
/// Transport errors are not represented here; they surface as
/// [`TransportError`] and receive identical handling either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server closed the stream normally.
    Completed {
        /// Events parsed and delivered during the session.
        delivered: u64,
    },
    /// The cancellation token fired; the loop is shutting down.
    Cancelled,
}

/// Drives the notification ingestion pipeline for one workspace hub.
///
/// Construct with [`NotificationLoop::new`] and either await
/// [`run`](NotificationLoop::run) directly or detach it with
/// [`spawn`](NotificationLoop::spawn).
pub struct NotificationLoop {
    cfg: FeedConfig,
    transport: Arc<dyn NotificationTransport>,
    hub: Arc<WorkspaceHub>,
}

impl NotificationLoop {
    /// Creates a loop over `transport`, delivering into `hub`.
    pub fn new(
        cfg: FeedConfig,
        transport: Arc<dyn NotificationTransport>,
        hub: Arc<WorkspaceHub>,
    ) -> Self {
        Self {
            cfg,
            transport,
            hub,
        }
    }

    /// Spawns [`run`](NotificationLoop::run) on the current runtime.
    ///
    /// Cancel `token` and await the handle for a clean shutdown.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(token))
    }

    /// Runs until `token` is cancelled.
    ///
    /// The first session is attempted one full period after startup,
    /// matching the reference cadence; ticks that land while a session is
    /// active are skipped, not queued.
    pub async fn run(self, token: CancellationToken) {
        let mut ticker = time::interval_at(
            Instant::now() + self.cfg.poll_period,
            self.cfg.poll_period,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match self.run_session(&token).await {
                Ok(SessionEnd::Cancelled) => break,
                Ok(SessionEnd::Completed { delivered }) => {
                    tracing::trace!(delivered, "notification session completed");
                }
                // Open failure, status rejection, and mid-read failure all
                // land here and are deliberately indistinguishable: retry
                // at the next tick.
                Err(err) => {
                    tracing::debug!(error = %err, label = err.as_label(), "notification session ended");
                }
            }
        }
    }

    /// Opens and drains one streaming session.
    ///
    /// For every fully parsed event the cursor is advanced, the hub's
    /// latest-notification cell is updated, and the notifications signal
    /// fans out, in that order, before the next line is examined.
    async fn run_session(&self, token: &CancellationToken) -> Result<SessionEnd, TransportError> {
        let cursor = self.hub.cursor();
        let mut stream = self.transport.open(cursor.as_deref()).await?;

        let mut reader = EventStreamReader::new(self.cfg.pending_limit());
        let mut delivered: u64 = 0;

        loop {
            let next = tokio::select! {
                next = stream.next() => next,
                _ = token.cancelled() => return Ok(SessionEnd::Cancelled),
            };

            match next {
                Some(Ok(chunk)) => {
                    reader.push(&chunk, &mut |event| {
                        delivered += 1;
                        self.hub.deliver(event);
                    });
                }
                Some(Err(err)) => return Err(err),
                None => break,
            }
        }

        if let Some(rest) = reader.finish() {
            tracing::debug!(
                dropped_bytes = rest.len(),
                "discarding unterminated event data at stream end"
            );
        }
        Ok(SessionEnd::Completed { delivered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ListenerRef;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Transport scripted with one canned outcome per `open` call.
    ///
    /// Outcomes past the end of the script behave like an unreachable
    /// server (open failure). Records the cursor passed to each call.
    struct ScriptedTransport {
        script: Mutex<Vec<Script>>,
        opens: AtomicUsize,
        cursors: Mutex<Vec<Option<String>>>,
    }

    enum Script {
        Chunks(Vec<&'static str>),
        OpenError,
        Hang,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
                opens: AtomicUsize::new(0),
                cursors: Mutex::new(Vec::new()),
            })
        }

        fn open_count(&self) -> usize {
            self.opens.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl NotificationTransport for ScriptedTransport {
        async fn open(&self, cursor: Option<&str>) -> Result<crate::ByteStream, TransportError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.cursors.lock().push(cursor.map(str::to_owned));

            let step = {
                let mut script = self.script.lock();
                if script.is_empty() {
                    Script::OpenError
                } else {
                    script.remove(0)
                }
            };

            match step {
                Script::Chunks(chunks) => {
                    let items: Vec<Result<Bytes, TransportError>> = chunks
                        .into_iter()
                        .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                        .collect();
                    Ok(Box::pin(futures::stream::iter(items)))
                }
                Script::OpenError => Err(TransportError::Open {
                    error: "connection refused".into(),
                }),
                Script::Hang => Ok(Box::pin(futures::stream::pending::<Result<Bytes, TransportError>>())),
            }
        }
    }

    fn loop_under_test(
        transport: &Arc<ScriptedTransport>,
        hub: &Arc<WorkspaceHub>,
    ) -> NotificationLoop {
        NotificationLoop::new(
            FeedConfig::default(),
            Arc::clone(transport) as Arc<dyn NotificationTransport>,
            Arc::clone(hub),
        )
    }

    const CHUNK_1: &str = "data:{\"eventId\":\"1\",\"sourceTag\":\"TaskService\",\"kindTag\":\"TaskAdded\",\"timestamp\":100}\ndata:{\"eventId\":\"2\",\"sourceTag\":\"Ta";
    const CHUNK_2: &str =
        "skService\",\"kindTag\":\"TaskCompleted\",\"timestamp\":101}\n";

    #[tokio::test(start_paused = true)]
    async fn delivers_split_events_and_advances_cursor() {
        let transport = ScriptedTransport::new(vec![Script::Chunks(vec![CHUNK_1, CHUNK_2])]);
        let hub = Arc::new(WorkspaceHub::new());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = Arc::clone(&seen);
        let hub_ref = Arc::clone(&hub);
        let listener: ListenerRef = Arc::new(move || {
            if let Some(n) = hub_ref.latest_notification() {
                seen_ref.lock().push(n.event_id);
            }
        });
        hub.notifications.subscribe(&listener);

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        // One period to the first tick, a little slack for the session.
        time::sleep(Duration::from_millis(2100)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(*seen.lock(), vec!["1", "2"]);
        assert_eq!(hub.cursor(), Some("2".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn active_session_suppresses_ticks() {
        let transport = ScriptedTransport::new(vec![Script::Hang]);
        let hub = Arc::new(WorkspaceHub::new());

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        // Many periods pass while the first session hangs; no second
        // session may start.
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(transport.open_count(), 1);

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failures_retry_at_fixed_rate_forever() {
        let transport = ScriptedTransport::new(vec![
            Script::OpenError,
            Script::OpenError,
            Script::OpenError,
        ]);
        let hub = Arc::new(WorkspaceHub::new());

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        // Default period is 2s; after ~10s the loop should have attempted
        // roughly every period with no backoff and no give-up.
        time::sleep(Duration::from_millis(10_500)).await;
        token.cancel();
        handle.await.unwrap();

        assert!(
            transport.open_count() >= 4,
            "expected steady retries, saw {}",
            transport.open_count()
        );
        assert_eq!(hub.cursor(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_carries_the_cursor() {
        let transport = ScriptedTransport::new(vec![
            Script::Chunks(vec![CHUNK_1, CHUNK_2]),
            Script::Chunks(vec![]),
        ]);
        let hub = Arc::new(WorkspaceHub::new());

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        time::sleep(Duration::from_millis(4500)).await;
        token.cancel();
        handle.await.unwrap();

        let cursors = transport.cursors.lock().clone();
        assert!(cursors.len() >= 2);
        assert_eq!(cursors[0], None);
        assert_eq!(cursors[1], Some("2".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn truncated_line_never_advances_cursor() {
        // The second event's line never completes in this session.
        let transport = ScriptedTransport::new(vec![Script::Chunks(vec![CHUNK_1])]);
        let hub = Arc::new(WorkspaceHub::new());

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        time::sleep(Duration::from_millis(2100)).await;
        token.cancel();
        handle.await.unwrap();

        // Only the fully parsed first event moved the cursor.
        assert_eq!(hub.cursor(), Some("1".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_an_active_session() {
        let transport = ScriptedTransport::new(vec![Script::Hang]);
        let hub = Arc::new(WorkspaceHub::new());

        let token = CancellationToken::new();
        let handle = loop_under_test(&transport, &hub).spawn(token.clone());

        time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(transport.open_count(), 1);

        // The hung read is abandoned; join must complete.
        token.cancel();
        handle.await.unwrap();
    }
}
