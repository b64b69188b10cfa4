use crate::error::ConfigError;

/// A reserved byte and the substitute written after an escape byte when the
/// reserved byte shows up in payload data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlByte {
    /// The reserved byte.
    pub byte: u8,
    /// Substitute that follows the escape byte in place of `byte`.
    pub escaped: u8,
}

impl ControlByte {
    /// Pair a reserved byte with its escaped substitute.
    pub const fn new(byte: u8, escaped: u8) -> Self {
        ControlByte { byte, escaped }
    }
}

/// A SLIP encoding: the control bytes that delimit and escape packets.
///
/// Some SLIP dialects frame packets with an end byte only, so the start byte
/// is optional. The active control and substitute bytes are always pairwise
/// distinct; the public constructors reject anything else.
///
/// An `Encoding` is a small `Copy` value that is never mutated, so one value
/// can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding {
    start: Option<ControlByte>,
    end: ControlByte,
    esc: ControlByte,
}

impl Encoding {
    /// RFC 1055 framing: no start byte, `0xC0` end, `0xDB` escape.
    pub const STANDARD: Encoding = Encoding {
        start: None,
        end: ControlByte::new(0xC0, 0xDC),
        esc: ControlByte::new(0xDB, 0xDD),
    };

    /// Start-delimited framing with the same bytes as the crate level
    /// [`encode`](crate::encode) and [`decode`](crate::decode) functions.
    pub const ALTERNATE: Encoding = Encoding {
        start: Some(ControlByte::new(crate::START, crate::ESC_START)),
        end: ControlByte::new(crate::END, crate::ESC_END),
        esc: ControlByte::new(crate::ESC, crate::ESC_ESC),
    };

    /// Build an encoding, checking that no byte plays two roles.
    pub fn new(
        start: Option<ControlByte>,
        end: ControlByte,
        esc: ControlByte,
    ) -> Result<Self, ConfigError> {
        let encoding = Encoding { start, end, esc };
        encoding.validate()?;
        Ok(encoding)
    }

    /// Build an encoding that frames packets with both a start and an end byte.
    pub fn with_start(
        start: u8,
        start_escaped: u8,
        end: u8,
        end_escaped: u8,
        esc: u8,
        esc_escaped: u8,
    ) -> Result<Self, ConfigError> {
        Self::new(
            Some(ControlByte::new(start, start_escaped)),
            ControlByte::new(end, end_escaped),
            ControlByte::new(esc, esc_escaped),
        )
    }

    /// Build an encoding that frames packets with an end byte only.
    pub fn without_start(
        end: u8,
        end_escaped: u8,
        esc: u8,
        esc_escaped: u8,
    ) -> Result<Self, ConfigError> {
        Self::new(
            None,
            ControlByte::new(end, end_escaped),
            ControlByte::new(esc, esc_escaped),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = [false; 256];
        let start = self.start.iter().flat_map(|c| [c.byte, c.escaped]);
        let rest = [self.end.byte, self.end.escaped, self.esc.byte, self.esc.escaped];
        for byte in start.chain(rest) {
            if seen[byte as usize] {
                return Err(ConfigError::DuplicateControlByte { byte });
            }
            seen[byte as usize] = true;
        }
        Ok(())
    }

    /// The start byte, if this encoding uses one.
    pub fn start(&self) -> Option<ControlByte> {
        self.start
    }

    /// The end byte.
    pub fn end(&self) -> ControlByte {
        self.end
    }

    /// The escape byte.
    pub fn esc(&self) -> ControlByte {
        self.esc
    }

    /// Number of framing bytes wrapped around every packet.
    pub fn frame_overhead(&self) -> usize {
        if self.start.is_some() {
            2
        } else {
            1
        }
    }

    /// Whether `byte` must be escaped when it appears in payload data.
    pub fn is_control_byte(&self, byte: u8) -> bool {
        byte == self.end.byte
            || byte == self.esc.byte
            || self.start.is_some_and(|start| byte == start.byte)
    }

    /// Whether `byte` may legally follow an escape byte.
    pub fn is_escaped_byte(&self, byte: u8) -> bool {
        byte == self.end.escaped
            || byte == self.esc.escaped
            || self.start.is_some_and(|start| byte == start.escaped)
    }

    /// Number of bytes in `payload` that need escaping.
    pub fn control_byte_count(&self, payload: &[u8]) -> usize {
        payload.iter().filter(|&&b| self.is_control_byte(b)).count()
    }

    /// Substitute written after the escape byte for control byte `byte`.
    pub fn escape(&self, byte: u8) -> Option<u8> {
        self.pairs()
            .find(|pair| pair.byte == byte)
            .map(|pair| pair.escaped)
    }

    /// Control byte represented by the substitute `escaped`.
    pub fn unescape(&self, escaped: u8) -> Option<u8> {
        self.pairs()
            .find(|pair| pair.escaped == escaped)
            .map(|pair| pair.byte)
    }

    fn pairs(&self) -> impl Iterator<Item = ControlByte> {
        self.start.into_iter().chain([self.end, self.esc])
    }
}

/// The default is [`Encoding::STANDARD`], plain RFC 1055 framing.
///
/// This is not the encoding behind the crate level [`encode`](crate::encode),
/// [`decode`](crate::decode) and [`is_reserved_byte`] functions, which use
/// [`Encoding::ALTERNATE`].
impl Default for Encoding {
    fn default() -> Self {
        Encoding::STANDARD
    }
}

/// Whether `byte` is reserved by the fixed encoding.
pub fn is_reserved_byte(byte: u8) -> bool {
    Encoding::ALTERNATE.is_control_byte(byte)
}

/// Number of bytes in `payload` reserved by the fixed encoding.
pub fn reserved_byte_count(payload: &[u8]) -> usize {
    Encoding::ALTERNATE.control_byte_count(payload)
}
