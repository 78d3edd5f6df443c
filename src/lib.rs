//! # notibus
//!
//! **Notibus** is a real-time notification ingestion pipeline for
//! desktop-style workspace clients.
//!
//! It keeps one streaming HTTP session to a notification endpoint alive,
//! reassembles line-delimited JSON events across arbitrary network chunk
//! boundaries, and fans parsed events out to listener registries embedded
//! in a shared workspace context.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!        server (SSE-like: one "data:<JSON>" line per event)
//!                            │ chunked bytes
//!                            ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  NotificationLoop (fixed-period scheduler)                        │
//! │  - at most one Active session; ticks while Active are skipped     │
//! │  - open(cursor) via NotificationTransport                         │
//! │  - open error / read error / clean end → Idle, retry next tick    │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                   ┌──────────────────────────┐
//!                   │   EventStreamReader      │
//!                   │ - incremental UTF-8      │
//!                   │ - newline framing        │
//!                   │ - truncation recovery    │
//!                   └───────────┬──────────────┘
//!                               │ one Notification at a time, in order
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  WorkspaceHub (one per application, passed by Arc)                │
//! │  - ResumeCursor (advanced only by fully parsed events)            │
//! │  - latest Notification                                            │
//! │  - one Signal per category: notifications, settings_changed, ...  │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!      cb1()              cb2()              cbN()
//!   (zero-payload; listeners re-read hub state)
//! ```
//!
//! ### Session lifecycle
//! ```text
//! Idle ──(tick)──► Active ──(end or error)──► Idle ──(tick)──► ...
//!
//! No backoff, no retry cap: never give up, never overlap.
//! ```
//!
//! ## Features
//! | Area           | Description                                              | Key types                          |
//! |----------------|----------------------------------------------------------|------------------------------------|
//! | **Ingestion**  | Chunk-tolerant SSE-like line reassembly.                 | [`EventStreamReader`]              |
//! | **Scheduling** | One session at a time, fixed-rate self-healing restarts. | [`NotificationLoop`]               |
//! | **Fan-out**    | Identity-keyed, ordered, panic-isolated registries.      | [`Signal`], [`WorkspaceHub`]       |
//! | **Transport**  | Cursor-resuming streaming HTTP, swappable framing.       | [`NotificationTransport`], [`HttpTransport`] |
//! | **Errors**     | Typed transport failures with stable log labels.         | [`TransportError`]                 |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use notibus::{FeedConfig, HttpTransport, ListenerRef, NotificationLoop, WorkspaceHub};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = FeedConfig::default();
//!     let hub = Arc::new(WorkspaceHub::new());
//!
//!     // React to new notifications; the signal itself carries no payload.
//!     let hub_ref = Arc::clone(&hub);
//!     let on_notification: ListenerRef = Arc::new(move || {
//!         if let Some(event) = hub_ref.latest_notification() {
//!             println!("[{}] {}", event.source_tag, event.kind_tag);
//!         }
//!     });
//!     hub.notifications.subscribe(&on_notification);
//!
//!     let transport = HttpTransport::new("http://127.0.0.1:12000/system/notify", &cfg)?;
//!     let token = CancellationToken::new();
//!     let handle = NotificationLoop::new(cfg, Arc::new(transport), hub).spawn(token.clone());
//!
//!     tokio::signal::ctrl_c().await?;
//!     token.cancel();
//!     handle.await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod stream;
mod workspace;

// ---- Public re-exports ----

pub use config::FeedConfig;
pub use core::{NotificationLoop, SessionEnd};
pub use error::TransportError;
pub use events::{ListenerRef, Notification, Signal};
pub use stream::{ByteStream, EventStreamReader, HttpTransport, NotificationTransport};
pub use workspace::{ResumeCursor, WorkspaceHub};
