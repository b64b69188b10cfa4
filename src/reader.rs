//! Packet iterator over a byte source.

use std::io::{self, Read};

use thiserror::Error;
use tracing::debug;

use crate::buffer::PacketBuffer;
use crate::error::SplitError;
use crate::split::Split;
use crate::Encoding;

const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Errors yielded by [`Packets`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A packet could not be split out of the stream.
    #[error("split error: {0}")]
    Split(#[from] SplitError),
}

/// Iterator over the decoded packets of a byte source.
///
/// Iteration ends when the reader reports end of file. Bytes left after the
/// last end byte are not a packet; they are kept aside and available through
/// [`trailing`](Packets::trailing).
///
/// A malformed packet is yielded as [`ReadError::Split`] after it has been
/// skipped, so iteration can continue with the next packet. An I/O error
/// ends iteration.
///
/// ```
/// use slip_framing::{Encoding, Packets};
///
/// let stream: &[u8] = &[0x01, 0x02, 0xc0, 0x03, 0xc0, 0x04];
/// let mut packets = Packets::new(Encoding::STANDARD, stream);
///
/// assert_eq!(vec![0x01, 0x02], packets.next().unwrap().unwrap());
/// assert_eq!(vec![0x03], packets.next().unwrap().unwrap());
/// assert!(packets.next().is_none());
/// assert_eq!(&[0x04], packets.trailing());
/// ```
#[derive(Debug)]
pub struct Packets<R> {
    reader: R,
    buffer: PacketBuffer,
    chunk: Vec<u8>,
    trailing: Vec<u8>,
    eof: bool,
    done: bool,
}

impl<R: Read> Packets<R> {
    /// Split packets out of `reader`, reading 4 KiB at a time.
    pub fn new(encoding: Encoding, reader: R) -> Self {
        Self::with_buffer(PacketBuffer::new(encoding), reader, DEFAULT_CHUNK_SIZE)
    }

    /// Split packets out of `reader`, reading `chunk_size` bytes at a time.
    pub fn with_capacity(encoding: Encoding, reader: R, chunk_size: usize) -> Self {
        Self::with_buffer(PacketBuffer::new(encoding), reader, chunk_size)
    }

    /// Split packets out of `reader` into a caller configured buffer.
    pub fn with_buffer(buffer: PacketBuffer, reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer,
            chunk: vec![0; chunk_size.max(1)],
            trailing: Vec::new(),
            eof: false,
            done: false,
        }
    }

    /// Unterminated bytes found at end of file.
    pub fn trailing(&self) -> &[u8] {
        &self.trailing
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> io::Result<()> {
        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.buffer.extend(&self.chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Iterator for Packets<R> {
    type Item = Result<Vec<u8>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.buffer.split(self.eof) {
                Ok(Split::Packet { payload, .. }) => return Some(Ok(payload)),
                Ok(Split::EndOfSource { remainder }) => {
                    if !remainder.is_empty() {
                        debug!(len = remainder.len(), "unterminated bytes at end of source");
                    }
                    self.trailing = remainder;
                    self.done = true;
                }
                Ok(Split::Incomplete) => {
                    if let Err(e) = self.fill() {
                        self.done = true;
                        return Some(Err(e.into()));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per read, interrupting every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            match self.data.split_first() {
                Some((&byte, rest)) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "line dropped"))
        }
    }

    const STREAM: [u8; 12] = [
        0x01, 0x02, 0x03, 0xc0, 0x04, 0xdb, 0xdc, 0xc0, 0xdb, 0xdd, 0x05, 0xc0,
    ];

    #[test]
    fn reads_every_packet() {
        let packets: Vec<Vec<u8>> = Packets::new(Encoding::STANDARD, &STREAM[..])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            vec![vec![0x01, 0x02, 0x03], vec![0x04, 0xc0], vec![0xdb, 0x05]],
            packets
        );
    }

    #[test]
    fn reads_byte_by_byte() {
        let reader = Trickle {
            data: &STREAM,
            interrupt: false,
        };
        let mut packets = Packets::with_capacity(Encoding::STANDARD, reader, 1);
        let collected: Vec<Vec<u8>> = packets.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(3, collected.len());
        assert_eq!(vec![0xdb, 0x05], collected[2]);
        assert!(packets.trailing().is_empty());
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut packets = Packets::new(Encoding::ALTERNATE, io::empty());
        assert!(packets.next().is_none());
        assert!(packets.next().is_none());
    }

    #[test]
    fn keeps_trailing_bytes() {
        const INPUT: [u8; 6] = [0xab, 0x01, 0xbc, 0xab, 0x02, 0xcd];

        let mut packets = Packets::new(Encoding::ALTERNATE, &INPUT[..]);
        assert_eq!(vec![0x01], packets.next().unwrap().unwrap());
        assert!(packets.next().is_none());
        assert_eq!(&[0xab, 0x02, 0xcd], packets.trailing());
    }

    #[test]
    fn continues_after_malformed_packet() {
        const INPUT: [u8; 10] = [0xab, 0x04, 0xcd, 0xab, 0xbc, 0xab, 0x05, 0xbc, 0xab, 0xbc];

        let mut packets = Packets::new(Encoding::ALTERNATE, &INPUT[..]);
        match packets.next() {
            Some(Err(ReadError::Split(SplitError::InvalidControlChar { index, byte, .. }))) => {
                assert_eq!(3, index);
                assert_eq!(0xab, byte);
            }
            other => panic!("expected split error, got {:?}", other),
        }
        assert_eq!(vec![0x05], packets.next().unwrap().unwrap());
        assert!(packets.next().unwrap().unwrap().is_empty());
        assert!(packets.next().is_none());
    }

    #[test]
    fn oversized_packet_is_never_yielded() {
        let mut stream = Encoding::STANDARD.encode(&[0x01, 0x02, 0x03, 0x04, 0xc0, 0x06]);
        stream.extend(Encoding::STANDARD.encode(&[0x09]));

        let buffer = PacketBuffer::with_max_len(Encoding::STANDARD, 4);
        let mut packets = Packets::with_buffer(buffer, &stream[..], 5);
        assert!(matches!(
            packets.next(),
            Some(Err(ReadError::Split(SplitError::TooLong { len: 5, max: 4 })))
        ));
        assert_eq!(vec![0x09], packets.next().unwrap().unwrap());
        assert!(packets.next().is_none());
        assert!(packets.trailing().is_empty());
    }

    #[test]
    fn into_inner_returns_reader() {
        const INPUT: [u8; 4] = [0x01, 0xc0, 0x02, 0xc0];

        let mut packets = Packets::with_capacity(Encoding::STANDARD, &INPUT[..], 2);
        assert_eq!(vec![0x01], packets.next().unwrap().unwrap());
        let rest = packets.into_inner();
        assert_eq!(&[0x02, 0xc0], rest);
    }

    #[test]
    fn io_error_ends_iteration() {
        let mut packets = Packets::new(Encoding::STANDARD, Broken);
        assert!(matches!(packets.next(), Some(Err(ReadError::Io(_)))));
        assert!(packets.next().is_none());
    }
}
