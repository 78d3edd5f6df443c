//! # Signal: one listener registry per event category.
//!
//! [`Signal`] is the generic publish/subscribe cell used throughout the
//! workspace. Every event category (notification arrived, settings changed,
//! selected conversation changed, ...) owns its own independent `Signal`.
//!
//! ## Architecture
//! ```text
//! Producers:                          Listeners (ordered, identity-deduped):
//!   NotificationLoop ──┐
//!   settings writer  ──┼── emit() ──► snapshot ──► cb1() cb2() ... cbN()
//!   list management  ──┘              (taken under lock, invoked outside it)
//! ```
//!
//! ## Rules
//! - **Zero-payload**: callbacks take no arguments and return nothing;
//!   listeners re-read whatever state they need from the shared hub. The
//!   contract is "something of this category changed", not "here is the
//!   new value".
//! - **Identity-keyed**: a handle is its `Arc` pointer. Subscribing the
//!   same handle twice is a no-op; two closures with identical code are
//!   still distinct handles.
//! - **Snapshot fan-out**: `emit()` clones the registration list under the
//!   lock and invokes the snapshot outside it, so subscribing or
//!   unsubscribing from inside a callback never deadlocks and never affects
//!   the pass already in flight.
//! - **Isolation**: a panicking listener is caught and logged; remaining
//!   listeners in the same pass still run.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

/// Shared handle to a zero-argument listener callback.
///
/// Keep a clone of the handle you subscribed; the same `Arc` is the key for
/// [`Signal::unsubscribe`].
pub type ListenerRef = Arc<dyn Fn() + Send + Sync>;

/// Ordered, identity-deduped listener registry with synchronous fan-out.
///
/// ### Properties
/// - Registration order is delivery order.
/// - Duplicate subscription of the same handle is a no-op.
/// - Mutation is allowed from any thread; the internal lock is held only
///   for registry edits and the snapshot, never across callbacks.
#[derive(Default)]
pub struct Signal {
    listeners: Mutex<Vec<ListenerRef>>,
}

impl Signal {
    /// Creates an empty signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to the registry unless already present.
    ///
    /// Presence is pointer identity (`Arc::ptr_eq`), so registering the
    /// same handle twice results in exactly one invocation per [`emit`].
    ///
    /// [`emit`]: Signal::emit
    pub fn subscribe(&self, listener: &ListenerRef) {
        let mut guard = self.listeners.lock();
        if !guard.iter().any(|l| Arc::ptr_eq(l, listener)) {
            guard.push(Arc::clone(listener));
        }
    }

    /// Removes the first entry matching `listener`; no-op if absent.
    ///
    /// A removal that races with an in-flight [`emit`] does not affect
    /// callbacks already snapshotted for that pass.
    ///
    /// [`emit`]: Signal::emit
    pub fn unsubscribe(&self, listener: &ListenerRef) {
        let mut guard = self.listeners.lock();
        if let Some(pos) = guard.iter().position(|l| Arc::ptr_eq(l, listener)) {
            guard.remove(pos);
        }
    }

    /// Invokes every currently registered listener, in registration order.
    ///
    /// Callbacks run synchronously on the calling thread. A panicking
    /// listener is caught and logged; the pass continues with the rest.
    pub fn emit(&self) {
        let snapshot: Vec<ListenerRef> = self.listeners.lock().clone();
        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener())).is_err() {
                tracing::warn!("listener panicked during fan-out");
            }
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// True if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").field("len", &self.len()).finish()
    }
}
