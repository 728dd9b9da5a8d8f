use crate::cursor::Cursor;
use crate::error::{Cause, Corrupted};

/// Size of every record header in bytes.
pub const HEADER_SIZE: usize = 8;

/// `version` value that marks a container record.
pub const CONTAINER_VERSION: u8 = 0xF;

/// The 8-byte tag in front of every record, atom or container.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                                  │
/// ├────────┼─────────┼──────────────────────────────────────────────┤
/// │ 0x00   │ 2 bytes │ u16 LE: bits 0..4 version, bits 4..16 inst.  │
/// │ 0x02   │ 2 bytes │ u16 LE: record type code                     │
/// │ 0x04   │ 4 bytes │ u32 LE: body length in bytes                 │
/// └────────┴─────────┴──────────────────────────────────────────────┘
/// ```
///
/// `length` covers everything after the header up to the next sibling.
/// It is the authority every body is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    /// 4-bit record version. `0xF` for containers.
    pub version: u8,
    /// 12-bit instance, a per-type sub-discriminator.
    pub instance: u16,
    pub record_type: u16,
    /// Body length in bytes.
    pub length: u32,
}

impl RecordHeader {
    /// Decode a header from its 8 raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        let ver_inst = u16::from_le_bytes([bytes[0], bytes[1]]);
        Self {
            version: (ver_inst & 0x000F) as u8,
            instance: ver_inst >> 4,
            record_type: u16::from_le_bytes([bytes[2], bytes[3]]),
            length: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Consume 8 bytes and decode them.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self, Corrupted> {
        let bytes = cursor.read_bytes(HEADER_SIZE)?;
        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(bytes);
        Ok(Self::from_bytes(raw))
    }

    /// Decode the next header without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn peek(cursor: &mut Cursor<'_>) -> Result<Self, Corrupted> {
        cursor.peek(Self::read)
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.version == CONTAINER_VERSION
    }
}

/// Which `instance` values a record or a slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instances {
    Any,
    Only(u16),
    OneOf(&'static [u16]),
    /// Every instance except the listed ones.
    Except(&'static [u16]),
}

impl Instances {
    #[must_use]
    pub fn contains(&self, instance: u16) -> bool {
        match self {
            Self::Any => true,
            Self::Only(only) => instance == *only,
            Self::OneOf(set) => set.contains(&instance),
            Self::Except(set) => !set.contains(&instance),
        }
    }
}

/// Which body lengths a record accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Length {
    Any,
    Exact(u32),
    OneOf(&'static [u32]),
    /// Any multiple of two (UTF-16 payloads).
    Even,
    AtLeast(u32),
}

impl Length {
    #[must_use]
    pub fn allows(&self, length: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(exact) => length == *exact,
            Self::OneOf(set) => set.contains(&length),
            Self::Even => length % 2 == 0,
            Self::AtLeast(min) => length >= *min,
        }
    }
}

/// The fixed constants a record's header must carry.
///
/// Every catalog record declares one of these. The header is checked
/// field by field right after it is read; any mismatch is fatal, so a
/// header is never partially accepted.
///
/// ```text
///   HeaderSpec::atom("TextHeaderAtom", 0x0F9F, Length::Exact(4))
///     version  == 0
///     instance == 0
///     type     == 0x0F9F
///     length   == 4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Record name used in diagnostics.
    pub name: &'static str,
    pub record_type: u16,
    /// `None` accepts any version.
    pub version: Option<u8>,
    pub instance: Instances,
    pub length: Length,
}

impl HeaderSpec {
    /// A container: version `0xF`, instance 0, any length.
    #[must_use]
    pub const fn container(name: &'static str, record_type: u16) -> Self {
        Self {
            name,
            record_type,
            version: Some(CONTAINER_VERSION),
            instance: Instances::Only(0),
            length: Length::Any,
        }
    }

    /// An atom: version 0, instance 0, the given length rule.
    #[must_use]
    pub const fn atom(name: &'static str, record_type: u16, length: Length) -> Self {
        Self {
            name,
            record_type,
            version: Some(0),
            instance: Instances::Only(0),
            length,
        }
    }

    #[must_use]
    pub const fn with_version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub const fn any_version(mut self) -> Self {
        self.version = None;
        self
    }

    #[must_use]
    pub const fn with_instances(mut self, instance: Instances) -> Self {
        self.instance = instance;
        self
    }

    /// Validate `header` against these constants.
    ///
    /// Fields are checked in header order: type, version, instance, length.
    ///
    /// # Errors
    ///
    /// Returns [`Cause::HeaderMismatch`] naming the first field that
    /// doesn't match, at `offset` (the header's own position).
    pub fn check(&self, header: &RecordHeader, offset: usize) -> Result<(), Corrupted> {
        let mismatch = |field, found| {
            Err(Corrupted::new(
                offset,
                Cause::HeaderMismatch {
                    record: self.name,
                    field,
                    found,
                },
            ))
        };

        if header.record_type != self.record_type {
            return mismatch("recType", u32::from(header.record_type));
        }
        if let Some(version) = self.version
            && header.version != version
        {
            return mismatch("recVer", u32::from(header.version));
        }
        if !self.instance.contains(header.instance) {
            return mismatch("recInstance", u32::from(header.instance));
        }
        if !self.length.allows(header.length) {
            return mismatch("recLen", header.length);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(version: u8, instance: u16, record_type: u16, length: u32) -> Vec<u8> {
        let ver_inst = u16::from(version) | (instance << 4);
        let mut buf = Vec::new();
        buf.extend_from_slice(&ver_inst.to_le_bytes());
        buf.extend_from_slice(&record_type.to_le_bytes());
        buf.extend_from_slice(&length.to_le_bytes());
        buf
    }

    #[test]
    fn decodes_packed_fields() {
        // 0x0F 0x00 → version 0xF, instance 0; type 0x03E8; length 0x40.
        let buf = [0x0F, 0x00, 0xE8, 0x03, 0x40, 0x00, 0x00, 0x00];
        let mut cursor = Cursor::new(&buf);
        let header = RecordHeader::read(&mut cursor).unwrap();
        assert_eq!(
            header,
            RecordHeader {
                version: 0xF,
                instance: 0,
                record_type: 0x03E8,
                length: 0x40,
            }
        );
        assert!(header.is_container());
        assert_eq!(cursor.position(), HEADER_SIZE);
    }

    #[test]
    fn instance_uses_the_high_twelve_bits() {
        let buf = raw(0x2, 0xABC, 0x1234, 7);
        let header = RecordHeader::read(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(header.version, 0x2);
        assert_eq!(header.instance, 0xABC);
        assert_eq!(header.record_type, 0x1234);
        assert_eq!(header.length, 7);
    }

    #[test]
    fn peek_never_moves_the_cursor() {
        let buf = raw(0, 1, 0x0FA0, 0);
        let mut cursor = Cursor::new(&buf);
        for _ in 0..5 {
            let header = RecordHeader::peek(&mut cursor).unwrap();
            assert_eq!(header.record_type, 0x0FA0);
            assert_eq!(cursor.position(), 0);
        }
        assert_eq!(cursor.peek_count(), 5);
    }

    #[test]
    fn short_buffer_is_corrupted() {
        let buf = [0u8; 7];
        let err = RecordHeader::read(&mut Cursor::new(&buf)).unwrap_err();
        assert!(matches!(err.cause, Cause::UnexpectedEof { needed: 8, .. }));
    }

    #[test]
    fn spec_checks_every_field() {
        const SPEC: HeaderSpec = HeaderSpec::atom("TestAtom", 0x0F9F, Length::Exact(4));
        let ok = RecordHeader::from_bytes(raw(0, 0, 0x0F9F, 4).try_into().unwrap());
        assert!(SPEC.check(&ok, 0).is_ok());

        let cases = [
            (raw(0, 0, 0x0FA0, 4), "recType"),
            (raw(1, 0, 0x0F9F, 4), "recVer"),
            (raw(0, 2, 0x0F9F, 4), "recInstance"),
            (raw(0, 0, 0x0F9F, 5), "recLen"),
        ];
        for (bytes, expected_field) in cases {
            let header = RecordHeader::from_bytes(bytes.try_into().unwrap());
            let err = SPEC.check(&header, 16).unwrap_err();
            assert_eq!(err.offset, 16);
            match err.cause {
                Cause::HeaderMismatch { field, record, .. } => {
                    assert_eq!(field, expected_field);
                    assert_eq!(record, "TestAtom");
                }
                other => panic!("expected HeaderMismatch, got {other:?}"),
            }
        }
    }

    #[test]
    fn instance_and_length_rules() {
        assert!(Instances::OneOf(&[3, 4]).contains(4));
        assert!(!Instances::OneOf(&[3, 4]).contains(5));
        assert!(Instances::Except(&[2, 5]).contains(1));
        assert!(!Instances::Except(&[2, 5]).contains(5));
        assert!(Length::Even.allows(10));
        assert!(!Length::Even.allows(9));
        assert!(Length::AtLeast(4).allows(4));
        assert!(!Length::OneOf(&[0x1C, 0x20]).allows(0x24));
    }
}
