//! Error types for the notification transport.
//!
//! A streaming session can fail in exactly two places: opening the request
//! and reading the response body. [`TransportError`] keeps the two apart for
//! logs, but the polling loop treats every variant identically: log, return
//! to idle, retry at the next tick.

use thiserror::Error;

/// # Errors produced by the notification transport.
///
/// Covers both establishing the streaming request and consuming its body.
/// None of these are fatal to the polling loop; they end the current session
/// and the next timer tick opens a new one.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The streaming request could not be established.
    #[error("failed to open notification stream: {error}")]
    Open {
        /// The underlying error message.
        error: String,
    },

    /// The server answered the open request with a non-success status.
    #[error("notification stream rejected with status {status}")]
    Status {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The connection dropped or the body errored mid-read.
    #[error("notification stream read failed: {error}")]
    Read {
        /// The underlying error message.
        error: String,
    },
}

impl TransportError {
    /// Wraps an open-phase error.
    pub fn open(err: impl std::fmt::Display) -> Self {
        TransportError::Open {
            error: err.to_string(),
        }
    }

    /// Wraps a read-phase error.
    pub fn read(err: impl std::fmt::Display) -> Self {
        TransportError::Read {
            error: err.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use notibus::TransportError;
    ///
    /// let err = TransportError::Status { status: 503 };
    /// assert_eq!(err.as_label(), "transport_status");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Open { .. } => "transport_open",
            TransportError::Status { .. } => "transport_status",
            TransportError::Read { .. } => "transport_read",
        }
    }
}
