//! UTF-8 decoding for the terminal parser
//!
//! Streaming decoder: bytes are buffered until a scalar value completes or
//! the run is provably invalid. The buffer survives across `Parser::feed`
//! calls, so a code point split between two reads decodes exactly once.

/// UTF-8 decoder state
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    /// Bytes accumulated for current character
    buffer: [u8; 4],
    /// Number of bytes in buffer
    len: usize,
    /// Expected total bytes for current character
    expected: usize,
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// Successfully decoded a character
    Char(char),
    /// The byte run was invalid and has been dropped
    Invalid,
    /// A pending run was cut short by a byte that is not a continuation.
    /// The run has been dropped; the byte itself was not consumed and should
    /// be fed again.
    Interrupted,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the decoder state, dropping any partial character
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Feed a byte to the decoder
    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        if self.len == 0 {
            return self.start(byte);
        }

        if byte & 0b1100_0000 != 0b1000_0000 {
            self.reset();
            return Utf8Result::Interrupted;
        }

        self.buffer[self.len] = byte;
        self.len += 1;
        if self.len < self.expected {
            return Utf8Result::Pending;
        }

        let result = self.decode();
        self.reset();
        result
    }

    fn start(&mut self, byte: u8) -> Utf8Result {
        let expected = match byte {
            0x00..=0x7F => return Utf8Result::Char(byte as char),
            // C0/C1 can only produce overlong encodings
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Utf8Result::Invalid,
        };
        self.buffer[0] = byte;
        self.len = 1;
        self.expected = expected;
        Utf8Result::Pending
    }

    fn decode(&self) -> Utf8Result {
        let b = &self.buffer;
        let (cp, min) = match self.expected {
            2 => (((b[0] & 0x1F) as u32) << 6 | (b[1] & 0x3F) as u32, 0x80),
            3 => (
                ((b[0] & 0x0F) as u32) << 12 | ((b[1] & 0x3F) as u32) << 6 | (b[2] & 0x3F) as u32,
                0x800,
            ),
            4 => (
                ((b[0] & 0x07) as u32) << 18
                    | ((b[1] & 0x3F) as u32) << 12
                    | ((b[2] & 0x3F) as u32) << 6
                    | (b[3] & 0x3F) as u32,
                0x10000,
            ),
            _ => return Utf8Result::Invalid,
        };

        // Overlong forms, surrogates and values past U+10FFFF
        if cp < min {
            return Utf8Result::Invalid;
        }
        char::from_u32(cp)
            .map(Utf8Result::Char)
            .unwrap_or(Utf8Result::Invalid)
    }
}
