//! # Incremental UTF-8 decoding.
//!
//! Network chunks can split a multi-byte code point anywhere. [`Utf8Stream`]
//! decodes chunk by chunk while holding an incomplete trailing sequence
//! internally, so the held bytes are never surfaced as text and never
//! corrupted. Invalid sequences decode to U+FFFD, matching a non-fatal
//! streaming text decoder.

use std::mem;
use std::str;

/// Streaming UTF-8 decoder with persistent state across calls.
///
/// At most 3 bytes (the longest incomplete prefix of a 4-byte sequence) are
/// carried between calls.
#[derive(Debug, Default)]
pub(crate) struct Utf8Stream {
    partial: Vec<u8>,
}

impl Utf8Stream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decodes `input`, prepending any bytes held from the previous call.
    ///
    /// An incomplete trailing multi-byte sequence is retained for the next
    /// call rather than decoded; malformed bytes become U+FFFD.
    pub(crate) fn decode(&mut self, input: &[u8]) -> String {
        let mut data = mem::take(&mut self.partial);
        data.extend_from_slice(input);

        let mut out = String::with_capacity(data.len());
        let mut rest: &[u8] = &data;
        while !rest.is_empty() {
            match str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    rest = &[];
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        // Malformed sequence of known length: substitute and resume after it.
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[bad..];
                        }
                        // Incomplete trailing sequence: hold it for the next chunk.
                        None => {
                            self.partial = tail.to_vec();
                            rest = &[];
                        }
                    }
                }
            }
        }
        out
    }
}
