// src/core/protocol/line_codec.rs

//! Implements the newline-delimited text frame format used by the control
//! socket, with the corresponding `Encoder` and `Decoder` for network
//! communication.

use crate::core::RelayError;
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The single byte that terminates every frame on the wire.
const DELIMITER: u8 = b'\n';

/// A `tokio_util::codec` implementation for newline-delimited text frames.
///
/// One frame is one line. Empty segments produced by consecutive delimiters
/// carry no payload and are skipped rather than yielded.
#[derive(Debug, Default)]
pub struct LineCodec;

impl Encoder<&str> for LineCodec {
    type Error = RelayError;

    /// Encodes a frame as its text followed by the delimiter byte.
    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(item.as_bytes());
        dst.extend_from_slice(&[DELIMITER]);
        Ok(())
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = RelayError;

    /// Decodes the next complete frame from the buffer, consuming it and its
    /// delimiter. Returns `Ok(None)` when no complete frame is available yet,
    /// which signals the caller to wait for more data.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(pos) = src.iter().position(|&b| b == DELIMITER) {
            let line = src.split_to(pos);
            // Consume the delimiter itself.
            src.advance(1);
            if line.is_empty() {
                continue;
            }
            return Ok(Some(String::from_utf8_lossy(&line).to_string()));
        }
        Ok(None)
    }
}

/// Accumulates raw read chunks and yields complete frames as they form.
///
/// The trailing, not-yet-terminated portion of the stream is carried across
/// `feed` calls, so frame boundaries are independent of how the bytes were
/// chunked by the transport. The pending fragment never contains a delimiter.
#[derive(Debug, Default)]
pub struct LineReassembler {
    buf: BytesMut,
    codec: LineCodec,
}

impl LineReassembler {
    /// Creates a reassembler with an empty pending fragment, equivalent to
    /// start-of-stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` to the pending fragment and drains every complete
    /// frame now available. Returns an empty vector when the combined buffer
    /// still contains no delimiter.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Ok(Some(frame)) = self.codec.decode(&mut self.buf) {
            frames.push(frame);
        }
        frames
    }

    /// The bytes received so far that do not yet form a complete frame.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Discards any pending fragment, e.g. after a reconnect.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}
