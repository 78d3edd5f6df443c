//! # Stream resumption cursor.
//!
//! Holds the `event_id` of the last fully parsed notification, or nothing
//! before the first event. Read when a new streaming session opens (sent to
//! the server so it can skip already-delivered events); written only after
//! an event parses completely. A partially buffered line never advances it.

use parking_lot::RwLock;

/// Last successfully processed event identifier.
///
/// One instance lives in the [`WorkspaceHub`](crate::WorkspaceHub) for the
/// lifetime of the workspace. Thread-safe; reads take a snapshot clone.
#[derive(Default)]
pub struct ResumeCursor {
    inner: RwLock<Option<String>>,
}

impl ResumeCursor {
    /// Creates an empty cursor ("no events seen yet").
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current cursor value, if any.
    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    /// Advances the cursor to `event_id`.
    ///
    /// Callers must only pass ids from fully parsed events; the cursor has
    /// no notion of ordering and stores whatever it is given.
    pub fn set(&self, event_id: String) {
        *self.inner.write() = Some(event_id);
    }
}

impl std::fmt::Debug for ResumeCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResumeCursor").field(&self.get()).finish()
    }
}
