//! # Notification stream transport.
//!
//! [`NotificationTransport`] is the seam between wire framing and event
//! dispatch: the polling loop only ever sees "open a stream for this
//! cursor, read byte chunks". Swapping the SSE-like line framing for a
//! stricter one means a new transport plus reader, with no changes to the
//! loop or the listener registries.
//!
//! [`HttpTransport`] is the production implementation: a POST to the
//! notification endpoint with the resumption cursor in a JSON body, the
//! response body consumed as a byte stream.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use serde::Serialize;

use crate::config::FeedConfig;
use crate::error::TransportError;

/// Chunked bytes of one streaming session.
///
/// Each item is one network chunk; an `Err` item ends the session the same
/// way a clean end-of-stream does.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Opens streaming notification sessions.
///
/// `open` may fail synchronously (request could not be established) or
/// return a stream that errors mid-read; the loop treats both identically.
#[async_trait]
pub trait NotificationTransport: Send + Sync + 'static {
    /// Opens one session, resuming after `cursor` if given.
    ///
    /// `None` asks the server to start from its retention window (first
    /// connection, before any event was parsed).
    async fn open(&self, cursor: Option<&str>) -> Result<ByteStream, TransportError>;
}

/// Request body carrying the resumption cursor.
///
/// `None` serializes as an explicit JSON `null`, the "no cursor yet"
/// sentinel the server expects on first connection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResumeRequest<'a> {
    last_event_id: Option<&'a str>,
}

/// HTTP implementation of [`NotificationTransport`].
///
/// POSTs `{"lastEventId": <cursor-or-null>}` to the endpoint and exposes
/// the streaming response body chunk by chunk.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` (e.g.
    /// `http://127.0.0.1:12000/system/notify`).
    ///
    /// The connect timeout comes from `cfg`; there is deliberately no
    /// overall request timeout, because a healthy session stays open
    /// indefinitely.
    pub fn new(endpoint: impl Into<String>, cfg: &FeedConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.open_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::open)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl NotificationTransport for HttpTransport {
    async fn open(&self, cursor: Option<&str>) -> Result<ByteStream, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ResumeRequest {
                last_event_id: cursor,
            })
            .send()
            .await
            .map_err(TransportError::open)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        Ok(Box::pin(response.bytes_stream().map_err(TransportError::read)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_request_carries_cursor() {
        let body = serde_json::to_string(&ResumeRequest {
            last_event_id: Some("41"),
        })
        .unwrap();
        assert_eq!(body, r#"{"lastEventId":"41"}"#);
    }

    #[test]
    fn missing_cursor_serializes_as_null() {
        let body = serde_json::to_string(&ResumeRequest {
            last_event_id: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"lastEventId":null}"#);
    }
}
