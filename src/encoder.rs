use bytes::BufMut;

use crate::Encoding;

impl Encoding {
    /// Size of the SLIP packet that encoding `payload` produces.
    pub fn encoded_len(&self, payload: &[u8]) -> usize {
        payload.len() + self.frame_overhead() + self.control_byte_count(payload)
    }

    /// Encode `payload` into a freshly allocated SLIP packet.
    ///
    /// The output is exactly [`encoded_len`](Self::encoded_len) bytes long.
    pub fn encode(&self, payload: &[u8]) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.encoded_len(payload));
        self.encode_to(payload, &mut output);
        output
    }

    /// Append the SLIP packet for `payload` to `output`.
    ///
    /// Growable sinks such as `Vec<u8>` and `BytesMut` always have room.
    ///
    /// # Panics
    ///
    /// Panics if `output` has a fixed capacity, such as `&mut [u8]`, and
    /// fewer than [`encoded_len`](Self::encoded_len) bytes remain in it.
    /// Check [`BufMut::remaining_mut`] first when writing into one.
    pub fn encode_to<B: BufMut>(&self, payload: &[u8], output: &mut B) {
        if let Some(start) = self.start() {
            output.put_u8(start.byte);
        }

        let esc = self.esc().byte;
        for &byte in payload {
            match self.escape(byte) {
                Some(escaped) => {
                    output.put_u8(esc);
                    output.put_u8(escaped);
                }
                None => output.put_u8(byte),
            }
        }

        output.put_u8(self.end().byte);
    }
}

/// Size of the packet [`encode`] produces for `payload`.
pub fn encoded_len(payload: &[u8]) -> usize {
    Encoding::ALTERNATE.encoded_len(payload)
}

/// Encode `payload` with the fixed `0xAB`/`0xBC`/`0xCD` control bytes.
pub fn encode(payload: &[u8]) -> Vec<u8> {
    Encoding::ALTERNATE.encode(payload)
}
