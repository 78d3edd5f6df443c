//! Pipeline core: session scheduling and lifecycle.
//!
//! The only public API from this module is [`NotificationLoop`], which owns
//! the recurring scheduler, drives streaming sessions to completion or
//! failure, and hands parsed events to the workspace hub.

mod poller;

pub use poller::{NotificationLoop, SessionEnd};
