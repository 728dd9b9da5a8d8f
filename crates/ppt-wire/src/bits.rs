/// Reader for sub-fields packed into one 8, 16 or 32-bit word.
///
/// Fields come out least-significant bit first: the first field declared by
/// the format occupies the lowest-order bits. Each [`read_bits`] call takes
/// the low `count` bits and shifts them away.
///
/// ```text
///   u16 flags = 0b0000_0000_0000_0101
///                                 │││
///   read_bit()  → true  ──────────┘││   bit 0
///   read_bit()  → false ───────────┘│   bit 1
///   read_bit()  → true  ────────────┘   bit 2
///   read_remaining_bits() → 0           bits 3..16 (reserved)
/// ```
///
/// The reader must be drained: reserved trailing bits are consumed with
/// [`read_remaining_bits`], which takes the reader by value and so closes
/// it. Debug builds assert on drop that every bit of the declared width
/// was consumed.
///
/// [`read_bits`]: Self::read_bits
/// [`read_remaining_bits`]: Self::read_remaining_bits
#[derive(Debug)]
pub struct BitFieldReader {
    value: u32,
    width: u32,
    remaining: u32,
}

impl BitFieldReader {
    #[must_use]
    pub fn from_u8(value: u8) -> Self {
        Self::with_width(u32::from(value), 8)
    }

    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        Self::with_width(u32::from(value), 16)
    }

    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        Self::with_width(value, 32)
    }

    fn with_width(value: u32, width: u32) -> Self {
        Self {
            value,
            width,
            remaining: width,
        }
    }

    /// Declared width of the packed word: 8, 16 or 32.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bits not yet consumed.
    #[must_use]
    pub fn remaining_width(&self) -> u32 {
        self.remaining
    }

    /// Extract the next `count` bits.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero or larger than the unread width. Reading
    /// past the declared word is a layout authoring error, never a
    /// property of the input data.
    pub fn read_bits(&mut self, count: u32) -> u32 {
        assert!(
            count >= 1 && count <= self.remaining,
            "cannot read {count} bits from a field with {} of {} bits left",
            self.remaining,
            self.width
        );
        let (field, rest) = if count == 32 {
            (self.value, 0)
        } else {
            (self.value & ((1 << count) - 1), self.value >> count)
        };
        self.value = rest;
        self.remaining -= count;
        field
    }

    /// Extract one bit as a flag.
    ///
    /// # Panics
    ///
    /// Panics if the word is already fully consumed.
    pub fn read_bit(&mut self) -> bool {
        self.read_bits(1) == 1
    }

    /// Drain whatever is left and close the reader.
    ///
    /// Returns 0 when nothing was left.
    #[must_use]
    pub fn read_remaining_bits(mut self) -> u32 {
        let rest = self.value;
        self.value = 0;
        self.remaining = 0;
        rest
    }
}

impl Drop for BitFieldReader {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            debug_assert!(
                self.remaining == 0,
                "bit field reader dropped with {} of {} bits unread",
                self.remaining,
                self.width
            );
        }
    }
}
