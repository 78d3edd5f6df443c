//! Streaming ingestion: transport, decoding, and line reassembly.
//!
//! Internal modules:
//! - [`transport`]: the seam between wire framing and event dispatch;
//! - [`decode`]: incremental UTF-8 decoding with state across chunks;
//! - [`reader`]: newline framing, `data:` recognition, truncation recovery.

mod decode;
mod reader;
mod transport;

pub use reader::EventStreamReader;
pub use transport::{ByteStream, HttpTransport, NotificationTransport};

pub(crate) use decode::Utf8Stream;
