//! # Feed configuration.
//!
//! [`FeedConfig`] centralizes the knobs of the notification loop: polling
//! cadence, transport connect timeout, and the reassembly buffer cap.
//!
//! Config is used in two ways:
//! 1. **Loop creation**: `NotificationLoop::new(config, transport, hub)`
//! 2. **Transport creation**: `HttpTransport::new(endpoint, &config)`
//!
//! ## Sentinel values
//! - `connect_timeout = 0s` → no connect timeout
//! - `max_pending_bytes = 0` → unbounded reassembly buffer

use std::time::Duration;

/// Configuration for the notification polling loop.
///
/// ## Field semantics
/// - `poll_period`: idle delay between session attempts; the timer is a
///   no-op while a session is active, so this never causes overlap
/// - `connect_timeout`: transport connect deadline (`0s` = none)
/// - `max_pending_bytes`: cap on the carried partial-line buffer (`0` =
///   unbounded); on overflow the buffer is dropped with a warning
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Period of the session scheduler.
    ///
    /// A new streaming session is attempted at most once per period, and
    /// only when no session is active. Ticks that land while a session is
    /// running are skipped, not queued.
    pub poll_period: Duration,

    /// Connect timeout applied when opening the streaming request.
    ///
    /// - `Duration::ZERO` = no timeout
    /// - `> 0` = fail the open (and retry next tick) past the deadline
    pub connect_timeout: Duration,

    /// Maximum size of the partial-line reassembly buffer, in bytes.
    ///
    /// A line that never parses keeps accumulating into the buffer; this
    /// cap bounds that growth for the rest of the session.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = when the buffer exceeds `n`, it is cleared and the
    ///   contents are dropped (warn)
    pub max_pending_bytes: usize,
}

impl FeedConfig {
    /// Returns the reassembly buffer cap as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → clear the buffer once it exceeds `n` bytes
    #[inline]
    pub fn pending_limit(&self) -> Option<usize> {
        if self.max_pending_bytes == 0 {
            None
        } else {
            Some(self.max_pending_bytes)
        }
    }

    /// Returns the transport connect timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → deadline applied when opening the stream
    #[inline]
    pub fn open_timeout(&self) -> Option<Duration> {
        if self.connect_timeout == Duration::ZERO {
            None
        } else {
            Some(self.connect_timeout)
        }
    }
}

impl Default for FeedConfig {
    /// Default configuration:
    ///
    /// - `poll_period = 2s` (reference cadence of the notification loop)
    /// - `connect_timeout = 10s`
    /// - `max_pending_bytes = 256 KiB`
    fn default() -> Self {
        Self {
            poll_period: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(10),
            max_pending_bytes: 256 * 1024,
        }
    }
}
