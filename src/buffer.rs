//! Push-style packet accumulator.
//!
//! Bytes arrive in arbitrary chunks from whatever is reading the line; the
//! buffer keeps them in a single `BytesMut` and hands back decoded packets as
//! soon as their end byte shows up.
//!
//! ```
//! use slip_framing::{Encoding, PacketBuffer};
//!
//! let mut buffer = PacketBuffer::new(Encoding::STANDARD);
//!
//! assert!(buffer.push(&[0x01, 0x02]).is_empty());
//!
//! let packets = buffer.push(&[0x03, 0xc0, 0x04]);
//! assert_eq!(vec![Ok(vec![0x01, 0x02, 0x03])], packets);
//! assert_eq!(vec![0x04], buffer.finish());
//! ```

use bytes::{Buf, BytesMut};
use tracing::warn;

use crate::error::SplitError;
use crate::split::Split;
use crate::Encoding;

/// Largest amount of unterminated data buffered by default (64 KiB).
pub const DEFAULT_MAX_LEN: usize = 64 * 1024;

const INITIAL_CAPACITY: usize = 4 * 1024;

/// Buffer for accumulating stream bytes and extracting complete packets.
#[derive(Debug)]
pub struct PacketBuffer {
    encoding: Encoding,
    buffer: BytesMut,
    max_len: usize,
    /// Set after `TooLong` until the end byte of the dropped packet is seen.
    discarding: bool,
}

impl PacketBuffer {
    /// Create a buffer with the default size limit.
    pub fn new(encoding: Encoding) -> Self {
        Self::with_max_len(encoding, DEFAULT_MAX_LEN)
    }

    /// Create a buffer that gives up on a packet once `max_len` bytes are
    /// buffered without an end byte.
    ///
    /// The rest of a packet given up on is dropped up to and including its
    /// end byte; none of it is ever returned as a packet.
    pub fn with_max_len(encoding: Encoding, max_len: usize) -> Self {
        Self {
            encoding,
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY.min(max_len)),
            max_len,
            discarding: false,
        }
    }

    /// The encoding packets are split with.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Append bytes without extracting packets.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Append bytes and extract every packet they complete.
    ///
    /// Malformed packets come back as errors in stream order; they have
    /// already been skipped.
    pub fn push(&mut self, data: &[u8]) -> Vec<Result<Vec<u8>, SplitError>> {
        self.extend(data);

        let mut packets = Vec::new();
        loop {
            match self.next_packet() {
                Ok(Some(packet)) => packets.push(Ok(packet)),
                Ok(None) => break,
                Err(e @ SplitError::TooLong { .. }) => {
                    packets.push(Err(e));
                    break;
                }
                Err(e) => packets.push(Err(e)),
            }
        }
        packets
    }

    /// Try to extract a single packet.
    ///
    /// Returns:
    /// - `Ok(Some(packet))` if a complete packet was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` if the packet at the front was malformed or too long
    pub fn next_packet(&mut self) -> Result<Option<Vec<u8>>, SplitError> {
        match self.split(false)? {
            Split::Packet { payload, .. } => Ok(Some(payload)),
            Split::Incomplete | Split::EndOfSource { .. } => Ok(None),
        }
    }

    /// Run the splitter over the buffered bytes and drop what it consumed.
    pub fn split(&mut self, at_eof: bool) -> Result<Split, SplitError> {
        if self.discarding && !self.skip_discarded() {
            return Ok(if at_eof {
                Split::EndOfSource {
                    remainder: Vec::new(),
                }
            } else {
                Split::Incomplete
            });
        }

        match self.encoding.split_next(&self.buffer, at_eof) {
            Ok(Split::Incomplete) if self.buffer.len() > self.max_len => {
                let len = self.buffer.len();
                warn!(len, max = self.max_len, "discarding unterminated packet");
                self.buffer.clear();
                self.discarding = true;
                Err(SplitError::TooLong {
                    len,
                    max: self.max_len,
                })
            }
            Ok(split) => {
                self.buffer.advance(split.consumed());
                Ok(split)
            }
            Err(e) => {
                self.buffer.advance(e.consumed());
                Err(e)
            }
        }
    }

    /// Drop the tail of a packet given up on. Returns whether its end byte
    /// has been reached.
    fn skip_discarded(&mut self) -> bool {
        let end = self.encoding.end().byte;
        match self.buffer.iter().position(|&b| b == end) {
            Some(i) => {
                self.buffer.advance(i + 1);
                self.discarding = false;
                true
            }
            None => {
                self.buffer.clear();
                false
            }
        }
    }

    /// Drain the bytes left after the last end byte.
    pub fn finish(&mut self) -> Vec<u8> {
        let remainder = self.buffer.to_vec();
        self.buffer.clear();
        remainder
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered bytes and start over at a packet boundary.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}
