//! Records of the edit chain: the current-user pointer, user edits and
//! persist directories.

use ppt_wire::{
    Cause, Corrupted, HeaderSpec, Length, Record, RecordReader, TextEncoding, validate,
};

use crate::enums::HeaderToken;
use crate::record_type::code;

/// Size of the fixed part of a `CurrentUserAtom`, as stored in its `size`
/// field.
pub const CURRENT_USER_FIXED_SIZE: u32 = 0x14;

/// `docFileVersion` of every file this decoder reads.
pub const DOC_FILE_VERSION: u16 = 0x03F4;

pub const MAJOR_VERSION: u8 = 3;
pub const MINOR_VERSION: u8 = 0;

/// Longest user name, in characters.
pub const MAX_USER_NAME_LEN: u16 = 255;

/// The only record of the `Current User` stream. Points at the newest
/// user edit in the document stream.
///
/// ```text
/// ┌────────┬──────────┬─────────────────────────────────────────┐
/// │ Offset │ Size     │ Field                                   │
/// ├────────┼──────────┼─────────────────────────────────────────┤
/// │ 0x00   │ 4        │ size (0x14)                             │
/// │ 0x04   │ 4        │ headerToken                             │
/// │ 0x08   │ 4        │ offsetToCurrentEdit                     │
/// │ 0x0C   │ 2        │ lenUserName (<= 255)                    │
/// │ 0x0E   │ 2        │ docFileVersion (0x03F4)                 │
/// │ 0x10   │ 1        │ majorVersion (3)                        │
/// │ 0x11   │ 1        │ minorVersion (0)                        │
/// │ 0x12   │ 2        │ unused                                  │
/// │ 0x14   │ len      │ ansiUserName                            │
/// │        │ 4        │ relVersion (8 or 9)                     │
/// │        │ 2 * len  │ unicodeUserName, optional               │
/// └────────┴──────────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUserAtom {
    pub header_token: HeaderToken,
    pub offset_to_current_edit: u32,
    pub ansi_user_name: String,
    pub rel_version: u32,
    pub unicode_user_name: Option<String>,
}

impl CurrentUserAtom {
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        self.header_token == HeaderToken::Encrypted
    }

    /// The Unicode name when present, the 8-bit one otherwise.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.unicode_user_name
            .as_deref()
            .unwrap_or(&self.ansi_user_name)
    }
}

impl Record for CurrentUserAtom {
    const HEADER: HeaderSpec = HeaderSpec::atom(
        "CurrentUserAtom",
        code::CURRENT_USER_ATOM,
        Length::AtLeast(CURRENT_USER_FIXED_SIZE + 4),
    );

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let size = body.read_u32()?;
        body.check(validate::expect_value("size", size, CURRENT_USER_FIXED_SIZE))?;
        let header_token = body.read_u32()?;
        let header_token = body.check(HeaderToken::from_wire(header_token))?;
        let offset_to_current_edit = body.read_u32()?;
        let len_user_name = body.read_u16()?;
        let len_user_name =
            body.check(validate::in_range("lenUserName", len_user_name, 0..=MAX_USER_NAME_LEN))?;
        let doc_file_version = body.read_u16()?;
        body.check(validate::expect_value("docFileVersion", doc_file_version, DOC_FILE_VERSION))?;
        let major = body.read_u8()?;
        body.check(validate::expect_value("majorVersion", major, MAJOR_VERSION))?;
        let minor = body.read_u8()?;
        body.check(validate::expect_value("minorVersion", minor, MINOR_VERSION))?;
        body.skip(2)?;

        let name_len = usize::from(len_user_name);
        let ansi_user_name = body.read_string(name_len, TextEncoding::Ansi)?;
        let rel_version = body.read_u32()?;
        if !matches!(rel_version, 8 | 9) {
            return Err(body.corrupted(Cause::OutOfRange {
                field: "relVersion",
                value: rel_version.into(),
            }));
        }
        let unicode_user_name = if body.is_exhausted() {
            None
        } else {
            Some(body.read_string(name_len * 2, TextEncoding::Utf16Le)?)
        };

        Ok(Self {
            header_token,
            offset_to_current_edit,
            ansi_user_name,
            rel_version,
            unicode_user_name,
        })
    }
}

/// One save of the document. Edits form a chain from newest to oldest
/// through `offset_last_edit`.
///
/// ```text
/// ┌────────┬──────┬─────────────────────────────────────────┐
/// │ Offset │ Size │ Field                                   │
/// ├────────┼──────┼─────────────────────────────────────────┤
/// │ 0x00   │ 4    │ lastSlideIdRef                          │
/// │ 0x04   │ 2    │ version                                 │
/// │ 0x06   │ 1    │ minorVersion (0)                        │
/// │ 0x07   │ 1    │ majorVersion (3)                        │
/// │ 0x08   │ 4    │ offsetLastEdit (0 = oldest)             │
/// │ 0x0C   │ 4    │ offsetPersistDirectory                  │
/// │ 0x10   │ 4    │ docPersistIdRef (1)                     │
/// │ 0x14   │ 4    │ persistIdSeed                           │
/// │ 0x18   │ 2    │ lastView                                │
/// │ 0x1A   │ 2    │ unused                                  │
/// │ 0x1C   │ 4    │ encryptSessionPersistIdRef, optional    │
/// └────────┴──────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserEditAtom {
    pub last_slide_id: u32,
    pub version: u16,
    pub offset_last_edit: u32,
    pub offset_persist_directory: u32,
    pub doc_persist_id: u32,
    pub persist_id_seed: u32,
    pub last_view: u16,
    pub encrypt_session_persist_id: Option<u32>,
}

impl Record for UserEditAtom {
    const HEADER: HeaderSpec = HeaderSpec::atom(
        "UserEditAtom",
        code::USER_EDIT_ATOM,
        Length::OneOf(&[0x1C, 0x20]),
    );

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let last_slide_id = body.read_u32()?;
        let version = body.read_u16()?;
        let minor = body.read_u8()?;
        body.check(validate::expect_value("minorVersion", minor, MINOR_VERSION))?;
        let major = body.read_u8()?;
        body.check(validate::expect_value("majorVersion", major, MAJOR_VERSION))?;
        let offset_last_edit = body.read_u32()?;
        let offset_persist_directory = body.read_u32()?;
        let doc_persist_id = body.read_u32()?;
        body.check(validate::expect_value("docPersistIdRef", doc_persist_id, 1))?;
        let persist_id_seed = body.read_u32()?;
        let last_view = body.read_u16()?;
        body.skip(2)?;
        let encrypt_session_persist_id = if body.is_exhausted() {
            None
        } else {
            Some(body.read_u32()?)
        };
        Ok(Self {
            last_slide_id,
            version,
            offset_last_edit,
            offset_persist_directory,
            doc_persist_id,
            persist_id_seed,
            last_view,
            encrypt_session_persist_id,
        })
    }
}

/// A run of consecutive persist ids starting at `start_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistDirectoryEntry {
    pub start_id: u32,
    /// Stream offsets of ids `start_id`, `start_id + 1`, ...
    pub offsets: Vec<u32>,
}

impl PersistDirectoryEntry {
    /// `(persist id, stream offset)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.start_id..).zip(self.offsets.iter().copied())
    }
}

/// Persist id to stream offset mapping written by one user edit.
///
/// Each entry starts with a `u32` holding the first persist id in its low
/// 20 bits and the offset count in its high 12 bits, followed by that
/// many `u32` offsets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistDirectoryAtom {
    pub entries: Vec<PersistDirectoryEntry>,
}

impl PersistDirectoryAtom {
    /// Every `(persist id, stream offset)` pair in the directory.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries.iter().flat_map(PersistDirectoryEntry::iter)
    }
}

impl Record for PersistDirectoryAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("PersistDirectoryAtom", code::PERSIST_DIRECTORY_ATOM, Length::Any);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let mut entries = Vec::new();
        while !body.is_exhausted() {
            let mut bits = body.read_bits_u32()?;
            let start_id = bits.read_bits(20);
            let count = bits.read_bits(12);
            let _ = bits.read_remaining_bits();

            let count = count as usize;
            if body.remaining() < count * 4 {
                return Err(body.corrupted(Cause::LengthMismatch {
                    declared: body.header().length,
                    consumed: body.position() - body.start() + count * 4,
                }));
            }
            let offsets = (0..count)
                .map(|_| body.read_u32())
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(PersistDirectoryEntry { start_id, offsets });
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom};
    use ppt_wire::{Limits, decode_at};

    fn current_user(token: u32, name: &str, unicode: bool) -> Vec<u8> {
        let len = u16::try_from(name.len()).unwrap();
        let mut body = Body::new()
            .u32(0x14)
            .u32(token)
            .u32(0x1234)
            .u16(len)
            .u16(0x03F4)
            .u8(3)
            .u8(0)
            .u16(0)
            .bytes(name.as_bytes())
            .u32(8);
        if unicode {
            body = body.utf16(name);
        }
        atom(0, 0, code::CURRENT_USER_ATOM, &body.build())
    }

    fn user_edit(last_edit: u32, directory: u32, encrypted: bool) -> Vec<u8> {
        let mut body = Body::new()
            .u32(256)
            .u16(0)
            .u8(0)
            .u8(3)
            .u32(last_edit)
            .u32(directory)
            .u32(1)
            .u32(4)
            .u16(1)
            .u16(0);
        if encrypted {
            body = body.u32(5);
        }
        atom(0, 0, code::USER_EDIT_ATOM, &body.build())
    }

    #[test]
    fn current_user_with_both_names() {
        let buf = current_user(0xE391_C05F, "alice", true);
        let user: CurrentUserAtom = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(user.offset_to_current_edit, 0x1234);
        assert_eq!(user.ansi_user_name, "alice");
        assert_eq!(user.unicode_user_name.as_deref(), Some("alice"));
        assert_eq!(user.rel_version, 8);
        assert!(!user.is_encrypted());
    }

    #[test]
    fn current_user_ansi_only() {
        let buf = current_user(0xF3D1_C4DF, "bob", false);
        let user: CurrentUserAtom = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(user.user_name(), "bob");
        assert!(user.is_encrypted());
    }

    #[test]
    fn current_user_bad_token() {
        let buf = current_user(0x1234_5678, "x", false);
        let err = decode_at::<CurrentUserAtom>(&buf, 0, Limits::default()).unwrap_err();
        assert!(matches!(
            err.cause,
            Cause::InvalidEnumValue {
                enum_name: "HeaderToken",
                ..
            }
        ));
    }

    #[test]
    fn user_edit_optional_trailing_field() {
        let plain: UserEditAtom =
            decode_at(&user_edit(0, 0x40, false), 0, Limits::default()).unwrap();
        assert_eq!(plain.encrypt_session_persist_id, None);
        assert_eq!(plain.offset_persist_directory, 0x40);

        let encrypted: UserEditAtom =
            decode_at(&user_edit(0, 0x40, true), 0, Limits::default()).unwrap();
        assert_eq!(encrypted.encrypt_session_persist_id, Some(5));
    }

    #[test]
    fn user_edit_pins_the_document_persist_id() {
        let mut buf = user_edit(0, 0, false);
        // docPersistIdRef lives at body offset 0x10.
        buf[8 + 0x10] = 2;
        let err = decode_at::<UserEditAtom>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::OutOfRange {
                field: "docPersistIdRef",
                value: 2
            }
        );
    }

    #[test]
    fn persist_directory_entries() {
        let body = Body::new()
            .u32((2 << 20) | 1)
            .u32(0x100)
            .u32(0x200)
            .u32((1 << 20) | 7)
            .u32(0x300)
            .build();
        let buf = atom(0, 0, code::PERSIST_DIRECTORY_ATOM, &body);
        let dir: PersistDirectoryAtom = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(
            dir.iter().collect::<Vec<_>>(),
            vec![(1, 0x100), (2, 0x200), (7, 0x300)]
        );
    }

    #[test]
    fn persist_directory_count_past_the_body() {
        let body = Body::new().u32((3 << 20) | 1).u32(0x100).build();
        let buf = atom(0, 0, code::PERSIST_DIRECTORY_ATOM, &body);
        let err = decode_at::<PersistDirectoryAtom>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::LengthMismatch {
                declared: 8,
                consumed: 16
            }
        );
    }
}
