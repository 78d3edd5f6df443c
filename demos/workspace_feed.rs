//! # Demo: workspace_feed
//!
//! Connect the notification loop to a local endpoint and print every event
//! that arrives, resuming from the last seen id across reconnects.
//!
//! Demonstrates how to:
//! - Build a `WorkspaceHub` and subscribe a listener to one category.
//! - Run `NotificationLoop` against an `HttpTransport`.
//! - Shut down cleanly with a `CancellationToken`.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► WorkspaceHub::new() + subscribe printer to hub.notifications
//!   ├─► NotificationLoop::spawn(token)
//!   │     ├─► every 2s (when idle): open stream with current cursor
//!   │     └─► per event: hub.deliver() → printer runs
//!   └─► ctrl-c → token.cancel() → join the loop
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example workspace_feed
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use notibus::{FeedConfig, HttpTransport, ListenerRef, NotificationLoop, WorkspaceHub};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notibus=debug".into()),
        )
        .init();

    let cfg = FeedConfig::default();
    let hub = Arc::new(WorkspaceHub::new());

    // Zero-payload signal: the printer re-reads the hub for content.
    let hub_ref = Arc::clone(&hub);
    let printer: ListenerRef = Arc::new(move || {
        if let Some(event) = hub_ref.latest_notification() {
            println!(
                "[notification] id={} source={} kind={} payload={:?}",
                event.event_id, event.source_tag, event.kind_tag, event.payload
            );
        }
    });
    hub.notifications.subscribe(&printer);

    let transport = HttpTransport::new("http://127.0.0.1:12000/system/notify", &cfg)?;
    let token = CancellationToken::new();
    let handle = NotificationLoop::new(cfg, Arc::new(transport), Arc::clone(&hub)).spawn(token.clone());

    println!("streaming notifications; ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    token.cancel();
    handle.await?;
    println!("stopped at cursor {:?}", hub.cursor());
    Ok(())
}
