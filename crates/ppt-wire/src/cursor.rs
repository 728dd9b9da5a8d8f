use crate::bits::BitFieldReader;
use crate::error::{Cause, Corrupted};

/// Character encodings used by fixed-length string fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    /// Two bytes per code unit, little-endian, surrogate pairs allowed.
    Utf16Le,
    /// One byte per character. Bytes map straight to U+0000..=U+00FF.
    Ansi,
}

/// A saved cursor position, produced by [`Cursor::save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

/// Position-tracking reader over an in-memory byte buffer.
///
/// The cursor borrows the buffer and owns only its position, so many
/// cursors can decode independent record trees over the same read-only
/// bytes. Every read is bounds-checked; running off the end of the buffer
/// is a [`Corrupted`] error carrying the offset of the failed read.
///
/// Lookahead goes through [`peek`](Self::peek), which always restores the
/// position, whatever the closure returns. The number of peeks is counted
/// so tests can observe how much lookahead a decode performed.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    peeks: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            peeks: 0,
        }
    }

    /// Create a cursor at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::OffsetOutOfBounds`] if `pos` is past the end of
    /// the buffer. An offset equal to the length is allowed.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self, Corrupted> {
        if pos > buf.len() {
            return Err(Corrupted::new(
                pos,
                Cause::OffsetOutOfBounds {
                    target: pos as u64,
                    len: buf.len(),
                },
            ));
        }
        Ok(Self { buf, pos, peeks: 0 })
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// How many times [`peek`](Self::peek) has been called on this cursor.
    #[must_use]
    pub fn peek_count(&self) -> usize {
        self.peeks
    }

    #[must_use]
    pub fn save(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// Run `f` against the cursor, then put the position back.
    ///
    /// The position is restored on both the success and the error path.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn peek<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let mark = self.save();
        self.peeks += 1;
        let result = f(self);
        self.restore(mark);
        result
    }

    /// Build a [`Corrupted`] error at the current position.
    #[must_use]
    pub fn corrupted(&self, cause: Cause) -> Corrupted {
        Corrupted::new(self.pos, cause)
    }

    fn eof(&self, needed: usize) -> Corrupted {
        self.corrupted(Cause::UnexpectedEof {
            needed,
            available: self.remaining(),
        })
    }

    // ── Raw bytes ─────────────────────────────────────────────────────────

    /// Read `count` bytes as a slice of the underlying buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], Corrupted> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| self.eof(count))?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Advance past `count` bytes without looking at them.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than `count` bytes remain.
    pub fn skip(&mut self, count: usize) -> Result<(), Corrupted> {
        self.read_bytes(count).map(|_| ())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], Corrupted> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    // ── Fixed-width scalars ───────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_u8(&mut self) -> Result<u8, Corrupted> {
        Ok(self.take::<1>()?[0])
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16_le(&mut self) -> Result<u16, Corrupted> {
        self.take().map(u16::from_le_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16_be(&mut self) -> Result<u16, Corrupted> {
        self.take().map(u16::from_be_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_i16_le(&mut self) -> Result<i16, Corrupted> {
        self.take().map(i16::from_le_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32_le(&mut self) -> Result<u32, Corrupted> {
        self.take().map(u32::from_le_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32, Corrupted> {
        self.take().map(u32::from_be_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32_le(&mut self) -> Result<i32, Corrupted> {
        self.take().map(i32::from_le_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_u64_le(&mut self) -> Result<u64, Corrupted> {
        self.take().map(u64::from_le_bytes)
    }

    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_f32_le(&mut self) -> Result<f32, Corrupted> {
        self.take().map(f32::from_le_bytes)
    }

    // ── Strings ───────────────────────────────────────────────────────────

    /// Read a string occupying exactly `byte_count` bytes.
    ///
    /// Embedded and trailing NULs are kept; callers that store
    /// NUL-padded names trim them.
    ///
    /// # Errors
    ///
    /// - [`Cause::UnexpectedEof`] if fewer than `byte_count` bytes remain.
    /// - [`Cause::InvalidText`] for an odd UTF-16 byte count or an
    ///   unpaired surrogate.
    pub fn read_fixed_string(
        &mut self,
        byte_count: usize,
        encoding: TextEncoding,
    ) -> Result<String, Corrupted> {
        let offset = self.pos;
        let bytes = self.read_bytes(byte_count)?;
        match encoding {
            TextEncoding::Utf16Le => {
                let invalid = || {
                    Corrupted::new(
                        offset,
                        Cause::InvalidText {
                            encoding: "UTF-16",
                        },
                    )
                };
                if bytes.len() % 2 != 0 {
                    return Err(invalid());
                }
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .collect::<Result<String, _>>()
                    .map_err(|_| invalid())
            }
            TextEncoding::Ansi => Ok(bytes.iter().copied().map(char::from).collect()),
        }
    }

    // ── Packed bit fields ─────────────────────────────────────────────────

    /// Read one byte and open a [`BitFieldReader`] over it.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] at the end of the buffer.
    pub fn read_bits_u8(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.read_u8().map(BitFieldReader::from_u8)
    }

    /// Read a little-endian `u16` and open a [`BitFieldReader`] over it.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_bits_u16(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.read_u16_le().map(BitFieldReader::from_u16)
    }

    /// Read a little-endian `u32` and open a [`BitFieldReader`] over it.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_bits_u32(&mut self) -> Result<BitFieldReader, Corrupted> {
        self.read_u32_le().map(BitFieldReader::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_scalars() {
        let buf = [
            0x01, // u8
            0x34, 0x12, // u16
            0x78, 0x56, 0x34, 0x12, // u32
            0xFF, 0xFF, 0xFF, 0xFF, // i32 = -1
        ];
        let mut cursor = Cursor::new(&buf);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16_le().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(cursor.read_i32_le().unwrap(), -1);
        assert_eq!(cursor.position(), buf.len());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn reads_big_endian_scalars() {
        let buf = [0x12, 0x34, 0x12, 0x34, 0x56, 0x78];
        let mut cursor = Cursor::new(&buf);
        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32_be().unwrap(), 0x1234_5678);
    }

    #[test]
    fn reads_f32() {
        let buf = 1.5f32.to_le_bytes();
        let mut cursor = Cursor::new(&buf);
        assert!((cursor.read_f32_le().unwrap() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn eof_reports_offset_and_shortfall() {
        let buf = [0u8; 3];
        let mut cursor = Cursor::new(&buf);
        cursor.read_u8().unwrap();
        let err = cursor.read_u32_le().unwrap_err();
        assert_eq!(err.offset, 1);
        assert_eq!(
            err.cause,
            Cause::UnexpectedEof {
                needed: 4,
                available: 2
            }
        );
        // A failed read doesn't move the cursor.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn peek_restores_position_on_success_and_error() {
        let buf = [1, 2, 3];
        let mut cursor = Cursor::new(&buf);
        let value = cursor.peek(Cursor::read_u16_le).unwrap();
        assert_eq!(value, 0x0201);
        assert_eq!(cursor.position(), 0);

        assert!(cursor.peek(Cursor::read_u64_le).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek_count(), 2);
    }

    #[test]
    fn save_and_restore() {
        let buf = [0u8; 8];
        let mut cursor = Cursor::new(&buf);
        cursor.skip(3).unwrap();
        let mark = cursor.save();
        cursor.skip(4).unwrap();
        cursor.restore(mark);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn at_rejects_offset_past_end() {
        let buf = [0u8; 4];
        assert!(Cursor::at(&buf, 4).is_ok());
        let err = Cursor::at(&buf, 5).unwrap_err();
        assert!(matches!(err.cause, Cause::OffsetOutOfBounds { target: 5, len: 4 }));
    }

    #[test]
    fn utf16_string() {
        let bytes: Vec<u8> = "Hé".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let mut cursor = Cursor::new(&bytes);
        let text = cursor
            .read_fixed_string(bytes.len(), TextEncoding::Utf16Le)
            .unwrap();
        assert_eq!(text, "Hé");
    }

    #[test]
    fn utf16_rejects_odd_length_and_lone_surrogate() {
        let mut cursor = Cursor::new(&[0x41, 0x00, 0x42]);
        assert!(matches!(
            cursor.read_fixed_string(3, TextEncoding::Utf16Le),
            Err(Corrupted {
                cause: Cause::InvalidText { .. },
                ..
            })
        ));

        let mut cursor = Cursor::new(&[0x00, 0xD8]);
        assert!(cursor.read_fixed_string(2, TextEncoding::Utf16Le).is_err());
    }

    #[test]
    fn ansi_string_maps_bytes_to_latin1() {
        let mut cursor = Cursor::new(&[b'O', b'K', 0xE9]);
        let text = cursor.read_fixed_string(3, TextEncoding::Ansi).unwrap();
        assert_eq!(text, "OKé");
    }
}
