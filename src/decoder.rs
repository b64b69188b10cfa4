use crate::error::{Error, Result};
use crate::Encoding;

impl Encoding {
    /// Decode one complete SLIP packet back into its payload.
    ///
    /// `packet` must hold exactly one frame: the start byte when this encoding
    /// uses one, the escaped payload, then the end byte.
    pub fn decode(&self, packet: &[u8]) -> Result<Vec<u8>> {
        let min = self.frame_overhead();
        if packet.len() < min {
            return Err(Error::FrameTooShort {
                len: packet.len(),
                min,
            });
        }

        let mut first = 0;
        if let Some(start) = self.start() {
            if packet[0] != start.byte {
                return Err(Error::MissingStart { found: packet[0] });
            }
            first = 1;
        }

        let last = packet.len() - 1;
        if packet[last] != self.end().byte {
            return Err(Error::MissingEnd {
                found: packet[last],
            });
        }

        self.decode_body(packet, first, last)
    }

    /// Unescape `packet[first..last]`.
    fn decode_body(&self, packet: &[u8], first: usize, last: usize) -> Result<Vec<u8>> {
        let esc = self.esc().byte;
        let mut output = Vec::with_capacity(last - first);
        let mut index = first;

        while index < last {
            let byte = packet[index];
            if byte != esc {
                output.push(byte);
                index += 1;
                continue;
            }

            let follower = index + 1;
            if follower == last {
                return Err(Error::TruncatedEscape { index });
            }
            match self.unescape(packet[follower]) {
                Some(control) => output.push(control),
                None => {
                    return Err(Error::InvalidEscapedChar {
                        index: follower,
                        byte: packet[follower],
                    })
                }
            }
            index += 2;
        }

        Ok(output)
    }
}

/// Decode a packet framed with the fixed `0xAB`/`0xBC`/`0xCD` control bytes.
///
/// Both the start and the end byte are required.
pub fn decode(packet: &[u8]) -> Result<Vec<u8>> {
    Encoding::ALTERNATE.decode(packet)
}
