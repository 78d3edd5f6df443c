//! # WorkspaceHub: the shared workspace context object.
//!
//! One `WorkspaceHub` exists per running application. It is constructed
//! explicitly and passed by reference (typically `Arc`) to every component
//! that needs it; there is no module-level global.
//!
//! The hub owns one [`Signal`] per event category plus the pieces of shared
//! state the notification pipeline maintains: the latest parsed
//! [`Notification`] and the [`ResumeCursor`].
//!
//! ## Delivery path
//! ```text
//! NotificationLoop ── deliver(n) ──► cursor.set(n.event_id)
//!                                    latest = n
//!                                    notifications.emit()
//!                                        │
//!                              cb1() cb2() ... cbN()
//!                              (each re-reads hub.latest_notification())
//! ```
//!
//! The signals are zero-payload on purpose: listeners re-read whatever state
//! they need from the hub instead of receiving it as an argument.

use parking_lot::RwLock;

use crate::events::{Notification, Signal};
use crate::workspace::ResumeCursor;

/// Shared workspace context: per-category signals and pipeline state.
///
/// All fields holding signals are public so components can subscribe
/// directly, e.g. `hub.settings_changed.subscribe(&handle)`.
#[derive(Debug, Default)]
pub struct WorkspaceHub {
    /// A new server notification was parsed and recorded.
    pub notifications: Signal,
    /// Settings were modified.
    pub settings_changed: Signal,
    /// The selected conversation changed.
    pub selected_conversation_changed: Signal,
    /// The conversation list changed (add/remove/visibility).
    pub conversation_list_changed: Signal,
    /// The background task list changed.
    pub tasks_changed: Signal,
    /// Download/fetch status changed.
    pub fetch_status_changed: Signal,
    /// The set of model servers changed.
    pub model_servers_changed: Signal,
    /// The UI theme changed.
    pub theme_changed: Signal,
    /// The UI language changed.
    pub language_changed: Signal,

    latest: RwLock<Option<Notification>>,
    cursor: ResumeCursor,
}

impl WorkspaceHub {
    /// Creates a hub with empty registries and no recorded notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently delivered notification, if any.
    ///
    /// Listeners on [`WorkspaceHub::notifications`] call this to get the
    /// event's content after the zero-payload signal fires.
    pub fn latest_notification(&self) -> Option<Notification> {
        self.latest.read().clone()
    }

    /// Returns the current resumption cursor value.
    pub fn cursor(&self) -> Option<String> {
        self.cursor.get()
    }

    /// Records one parsed notification and fans out the signal.
    ///
    /// Order matters: the cursor and latest-notification cell are updated
    /// before listeners run, so a listener reading the hub always observes
    /// the event that triggered it.
    pub(crate) fn deliver(&self, notification: Notification) {
        self.cursor.set(notification.event_id.clone());
        *self.latest.write() = Some(notification);
        self.notifications.emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ListenerRef;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn note(id: &str) -> Notification {
        Notification {
            event_id: id.into(),
            source_tag: "TaskService".into(),
            kind_tag: "TaskAdded".into(),
            timestamp: 100,
            payload: None,
        }
    }

    #[test]
    fn deliver_updates_cursor_latest_and_emits() {
        let hub = Arc::new(WorkspaceHub::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let hub_ref = Arc::clone(&hub);
        let hits_ref = Arc::clone(&hits);
        let listener: ListenerRef = Arc::new(move || {
            // State is visible before the signal fires.
            let seen = hub_ref.latest_notification().map(|n| n.event_id);
            assert_eq!(seen, hub_ref.cursor());
            hits_ref.fetch_add(1, Ordering::SeqCst);
        });
        hub.notifications.subscribe(&listener);

        hub.deliver(note("1"));
        hub.deliver(note("2"));

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(hub.cursor(), Some("2".into()));
        assert_eq!(hub.latest_notification().map(|n| n.event_id), Some("2".into()));
    }

    #[test]
    fn duplicate_events_are_redelivered() {
        let hub = WorkspaceHub::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_ref = Arc::clone(&hits);
        let listener: ListenerRef = Arc::new(move || {
            hits_ref.fetch_add(1, Ordering::SeqCst);
        });
        hub.notifications.subscribe(&listener);

        hub.deliver(note("5"));
        hub.deliver(note("5"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(hub.cursor(), Some("5".into()));
    }

    #[test]
    fn categories_are_independent() {
        let hub = WorkspaceHub::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_ref = Arc::clone(&hits);
        let listener: ListenerRef = Arc::new(move || {
            hits_ref.fetch_add(1, Ordering::SeqCst);
        });
        hub.settings_changed.subscribe(&listener);

        hub.tasks_changed.emit();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        hub.settings_changed.emit();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
