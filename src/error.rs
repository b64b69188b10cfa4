use thiserror::Error;

/// Type alias for handling SLIP decode errors.
pub type Result<T> = core::result::Result<T, self::Error>;

/// Errors encountered while decoding a complete SLIP packet.
///
/// Indices are positions in the framed packet handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The buffer is shorter than the smallest possible frame.
    #[error("frame too short: {len} bytes, need at least {min}")]
    FrameTooShort {
        /// Length of the rejected buffer.
        len: usize,
        /// Minimum frame length for the encoding.
        min: usize,
    },

    /// The first byte is not the start byte.
    #[error("missing start byte, found 0x{found:02X}")]
    MissingStart {
        /// Byte found in the start position.
        found: u8,
    },

    /// The last byte is not the end byte.
    #[error("missing end byte, found 0x{found:02X}")]
    MissingEnd {
        /// Byte found in the end position.
        found: u8,
    },

    /// An escape byte is the last byte before the end byte.
    #[error("escape at index {index} has no follower")]
    TruncatedEscape {
        /// Index of the dangling escape byte.
        index: usize,
    },

    /// The byte after an escape byte is not an escaped substitute.
    #[error("invalid escaped byte 0x{byte:02X} at index {index}")]
    InvalidEscapedChar {
        /// Index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
}

/// Errors reported by the stream splitter.
///
/// Each variant carries the number of bytes the caller should skip to
/// resynchronize at the next packet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// A byte following an escape byte is not an escaped substitute.
    #[error("invalid control character 0x{byte:02X} escaped at index {index}")]
    InvalidControlChar {
        /// Index of the offending byte, relative to the scanned buffer.
        index: usize,
        /// The offending byte.
        byte: u8,
        /// Bytes spanned by the malformed packet, end byte included.
        consumed: usize,
    },

    /// An escape byte directly precedes the end byte.
    #[error("escape at index {index} directly precedes the end byte")]
    TruncatedEscape {
        /// Index of the dangling escape byte, relative to the scanned buffer.
        index: usize,
        /// Bytes spanned by the malformed packet, end byte included.
        consumed: usize,
    },

    /// More than `max` bytes were buffered without an end byte.
    #[error("{len} bytes buffered without an end byte, limit is {max}")]
    TooLong {
        /// Number of bytes that were buffered, and discarded.
        len: usize,
        /// The configured limit.
        max: usize,
    },
}

impl SplitError {
    /// Number of input bytes the error accounts for.
    pub fn consumed(&self) -> usize {
        match *self {
            SplitError::InvalidControlChar { consumed, .. } => consumed,
            SplitError::TruncatedEscape { consumed, .. } => consumed,
            SplitError::TooLong { len, .. } => len,
        }
    }
}

/// Errors building an [`Encoding`](crate::Encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The same byte value was given for two control or substitute roles.
    #[error("byte 0x{byte:02X} is used for more than one control role")]
    DuplicateControlByte {
        /// The repeated byte.
        byte: u8,
    },
}
