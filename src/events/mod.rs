//! Workspace events: the wire data model and the fan-out registry.
//!
//! This module groups the event **data model** and the **signal** type used
//! to publish/subscribe to workspace-level happenings (a notification
//! arrived, settings changed, the selected conversation changed, ...).
//!
//! ## Contents
//! - [`Notification`] one parsed unit of server-pushed information
//! - [`Signal`] identity-keyed listener registry with synchronous fan-out
//!
//! ## Quick reference
//! - **Publishers**: `NotificationLoop` (via `WorkspaceHub::deliver`) and
//!   any component that mutates shared workspace state.
//! - **Consumers**: UI components and services that subscribe a callback per
//!   category and re-read whatever state they need from the hub.
//!
//! See `lib.rs` for the system-level wiring diagram.

mod notification;
mod signal;

pub use notification::Notification;
pub use signal::{ListenerRef, Signal};
