//! # Server-pushed notification events.
//!
//! [`Notification`] is one parsed unit of information from the streaming
//! notification endpoint. Events originate in backend subsystems (process
//! lifecycle, task lifecycle, fetch lifecycle) and arrive as one
//! `data:<JSON>` line each.
//!
//! ## Ordering
//! Within one streaming session, `event_id` values are non-decreasing in
//! arrival order. The pipeline does not assume strict increase: duplicates
//! are tolerated and simply re-delivered to listeners.

use serde::{Deserialize, Serialize};

/// One parsed server-pushed notification.
///
/// The JSON wire shape uses camelCase field names:
///
/// ```json
/// {"eventId":"42","sourceTag":"TaskService","kindTag":"TaskAdded","timestamp":100}
/// ```
///
/// Unknown fields are ignored, so the server can extend the shape without
/// breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Opaque monotonic identifier assigned by the server.
    ///
    /// Used as the resumption cursor: the last parsed id is sent when a new
    /// session opens so the server can skip already-delivered events.
    pub event_id: String,

    /// Which subsystem emitted the event (e.g. `TaskService`).
    pub source_tag: String,

    /// Specific event kind within the source (e.g. `TaskAdded`).
    pub kind_tag: String,

    /// Emission time, server clock (milliseconds since the epoch).
    pub timestamp: u64,

    /// Optional opaque content. Not interpreted by this pipeline.
    #[serde(default)]
    pub payload: Option<String>,
}
