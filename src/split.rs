use tracing::{debug, trace};

use crate::error::SplitError;
use crate::Encoding;

/// Outcome of one [`Encoding::split_next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    /// No end byte yet and more data may still arrive. Nothing was consumed.
    Incomplete,
    /// The source is exhausted. Every remaining byte was consumed; `remainder`
    /// holds the bytes that never saw an end byte and may be empty.
    EndOfSource {
        /// Unterminated trailing bytes.
        remainder: Vec<u8>,
    },
    /// A complete packet was found and decoded.
    Packet {
        /// Bytes consumed from the front of the buffer, end byte included.
        consumed: usize,
        /// The decoded payload.
        payload: Vec<u8>,
    },
}

impl Split {
    /// Number of bytes the caller should drop from the front of its buffer.
    pub fn consumed(&self) -> usize {
        match self {
            Split::Incomplete => 0,
            Split::EndOfSource { remainder } => remainder.len(),
            Split::Packet { consumed, .. } => *consumed,
        }
    }
}

impl Encoding {
    /// Locate and decode the next packet at the front of a stream buffer.
    ///
    /// `data` is whatever prefix of the stream is currently available and
    /// `at_eof` tells whether more bytes can ever follow it. A leading start
    /// byte is skipped when this encoding has one; its absence is tolerated
    /// because only the end byte delimits packets in a stream.
    ///
    /// On error the malformed packet still spans
    /// [`SplitError::consumed`] bytes, so a caller can skip past it and carry
    /// on at the next packet.
    pub fn split_next(&self, data: &[u8], at_eof: bool) -> Result<Split, SplitError> {
        let end = self.end().byte;
        let esc = self.esc().byte;

        let mut end_index = None;
        let mut payload_len = 0;
        for (i, &byte) in data.iter().enumerate() {
            if byte == end {
                end_index = Some(i);
                break;
            } else if byte != esc {
                payload_len += 1;
            }
        }

        let end_index = match end_index {
            Some(i) => i,
            None if at_eof => {
                return Ok(Split::EndOfSource {
                    remainder: data.to_vec(),
                })
            }
            None => return Ok(Split::Incomplete),
        };
        let consumed = end_index + 1;

        let mut first = 0;
        if let Some(start) = self.start() {
            if end_index > 0 && data[0] == start.byte {
                first = 1;
                payload_len -= 1;
            }
        }

        let mut payload = Vec::with_capacity(payload_len);
        let mut in_escape = false;
        for (i, &byte) in data.iter().enumerate().take(end_index).skip(first) {
            if in_escape {
                in_escape = false;
                match self.unescape(byte) {
                    Some(control) => payload.push(control),
                    None => {
                        debug!(index = i, byte, "invalid escaped byte in packet");
                        return Err(SplitError::InvalidControlChar {
                            index: i,
                            byte,
                            consumed,
                        });
                    }
                }
            } else if byte == esc {
                in_escape = true;
            } else {
                payload.push(byte);
            }
        }

        if in_escape {
            debug!(index = end_index - 1, "escape byte directly before end byte");
            return Err(SplitError::TruncatedEscape {
                index: end_index - 1,
                consumed,
            });
        }

        trace!(consumed, len = payload.len(), "split packet");
        Ok(Split::Packet { consumed, payload })
    }
}
