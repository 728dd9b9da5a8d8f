//! Builders for hand-assembled record bytes.
//!
//! Available to this crate's tests and, behind the `fixtures` feature, to
//! downstream test crates. Nothing here validates: the point is to build
//! both well-formed and deliberately broken records.

use crate::header::HEADER_SIZE;

/// Encode an 8-byte record header.
#[must_use]
pub fn header(version: u8, instance: u16, record_type: u16, length: u32) -> [u8; HEADER_SIZE] {
    let ver_inst = u16::from(version & 0x0F) | (instance << 4);
    let mut out = [0u8; HEADER_SIZE];
    out[0..2].copy_from_slice(&ver_inst.to_le_bytes());
    out[2..4].copy_from_slice(&record_type.to_le_bytes());
    out[4..8].copy_from_slice(&length.to_le_bytes());
    out
}

/// A record whose header length is the size of `body`.
///
/// # Panics
///
/// Panics if `body` is longer than `u32::MAX` bytes.
#[must_use]
pub fn atom(version: u8, instance: u16, record_type: u16, body: &[u8]) -> Vec<u8> {
    let length = u32::try_from(body.len()).expect("fixture body fits in u32");
    let mut out = header(version, instance, record_type, length).to_vec();
    out.extend_from_slice(body);
    out
}

/// A version `0xF` record holding the concatenated `children`.
#[must_use]
pub fn container(record_type: u16, instance: u16, children: &[Vec<u8>]) -> Vec<u8> {
    atom(0xF, instance, record_type, &children.concat())
}

/// Little-endian body builder.
///
/// ```text
///   Body::new().u16(1).u32(0x0F9F).utf16("Hi").build()
///     → 01 00 | 9F 0F 00 00 | 48 00 69 00
/// ```
#[derive(Clone, Debug, Default)]
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    #[must_use]
    pub fn u16(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn i16(mut self, value: i16) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn i32(mut self, value: i32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn u64(mut self, value: u64) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn f32(mut self, value: f32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.bytes.extend_from_slice(value);
        self
    }

    /// UTF-16LE code units, no terminator.
    #[must_use]
    pub fn utf16(mut self, text: &str) -> Self {
        for unit in text.encode_utf16() {
            self.bytes.extend_from_slice(&unit.to_le_bytes());
        }
        self
    }

    #[must_use]
    pub fn zeros(mut self, count: usize) -> Self {
        self.bytes.resize(self.bytes.len() + count, 0);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
