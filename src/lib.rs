//! SLIP-family packet framing
//!
//! Byte-stuffing codec in the style of [RFC 1055](https://tools.ietf.org/html/rfc1055)
//! Serial Line IP, generalized to configurable control bytes.
//!
//! ## What is SLIP
//!
//! SLIP is a very simple packet framing protocol. It is used to convert streams of
//! bytes into frames and vice versa. It has no addressing, packet types, error
//! correction or compression. A packet ends with an END byte (and, in some
//! dialects, starts with a START byte); any control byte inside the payload is
//! replaced by an ESC byte followed by a substitute.
//!
//! ## Encodings
//!
//! The crate level [`encode`] and [`decode`] functions use a fixed set of
//! control bytes: `0xAB` start, `0xBC` end and `0xCD` escape. Any other set is
//! described by an [`Encoding`], including [`Encoding::STANDARD`] for plain
//! RFC 1055 framing which has no start byte.
//!
//! ## Examples
//!
//! ### Encoding and decoding
//!
//! ```
//! const INPUT: &[u8] = &[0x01, 0xbc, 0x02];
//! const EXPECTED: &[u8] = &[0xab, 0x01, 0xcd, 0xbd, 0x02, 0xbc];
//!
//! let packet = slip_framing::encode(INPUT);
//! assert_eq!(EXPECTED, packet.as_slice());
//! assert_eq!(packet.len(), slip_framing::encoded_len(INPUT));
//!
//! let payload = slip_framing::decode(&packet).unwrap();
//! assert_eq!(INPUT, payload.as_slice());
//! ```
//!
//! ### Splitting a stream
//!
//! Since packets carry no length, the splitter scans for the end byte and tells
//! apart a packet that is not complete yet from a source that ran dry:
//!
//! ```
//! use slip_framing::{Encoding, Split};
//!
//! const STREAM: &[u8] = &[0x01, 0x02, 0x03, 0xc0, 0x04, 0xdb];
//! let enc = Encoding::STANDARD;
//!
//! let first = enc.split_next(STREAM, false).unwrap();
//! assert_eq!(Split::Packet { consumed: 4, payload: vec![0x01, 0x02, 0x03] }, first);
//!
//! let rest = &STREAM[first.consumed()..];
//! assert_eq!(Split::Incomplete, enc.split_next(rest, false).unwrap());
//! assert_eq!(
//!     Split::EndOfSource { remainder: vec![0x04, 0xdb] },
//!     enc.split_next(rest, true).unwrap(),
//! );
//! ```

#![deny(missing_docs)]
#![deny(warnings)]

mod buffer;
mod decoder;
mod encoder;
mod encoding;
mod error;
mod reader;
mod split;

pub use buffer::{PacketBuffer, DEFAULT_MAX_LEN};
pub use decoder::decode;
pub use encoder::{encode, encoded_len};
pub use encoding::{is_reserved_byte, reserved_byte_count, ControlByte, Encoding};
pub use error::{ConfigError, Error, Result, SplitError};
pub use reader::{Packets, ReadError};
pub use split::Split;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;

/// Frame start
pub const START: u8 = 0xAB;

/// Frame end
pub const END: u8 = 0xBC;

/// Frame escape
pub const ESC: u8 = 0xCD;

/// Transposed frame start
pub const ESC_START: u8 = 0xAC;

/// Transposed frame end
pub const ESC_END: u8 = 0xBD;

/// Transposed frame escape
pub const ESC_ESC: u8 = 0xCE;
