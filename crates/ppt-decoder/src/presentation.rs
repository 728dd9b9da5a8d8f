use ppt_records::record_type::code;
use ppt_records::{
    CurrentUserAtom, DocumentContainer, NotesContainer, Opaque, SlideContainer, SlideListKind,
    SlideListWithText,
};
use ppt_wire::{
    Cause, Corrupted, Cursor, DecodeFn, Depth, RecordHeader, Variant, decode_at, decode_record,
    decode_variant_at,
};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::edit_chain::EditChain;
use crate::stream::{self, CURRENT_USER_STREAM, DOCUMENT_STREAM, StreamSource};

/// A main master, kept undecoded.
pub type MainMaster = Opaque<{ code::MAIN_MASTER }>;

/// An entry of the master list: a main master, or a title master laid
/// out like a slide.
#[derive(Clone, Debug, PartialEq)]
pub enum Master {
    Main(MainMaster),
    Title(SlideContainer),
}

fn decode_main_master(cursor: &mut Cursor<'_>, depth: Depth) -> Result<Master, Corrupted> {
    decode_record(cursor, depth).map(Master::Main)
}

fn decode_title_master(cursor: &mut Cursor<'_>, depth: Depth) -> Result<Master, Corrupted> {
    decode_record(cursor, depth).map(Master::Title)
}

impl Variant for Master {
    const NAME: &'static str = "Master";

    fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>> {
        let decode: DecodeFn<Self> = match header.record_type {
            code::MAIN_MASTER => decode_main_master,
            code::SLIDE => decode_title_master,
            _ => return None,
        };
        Some(decode)
    }
}

/// A record reached through a persist id.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistObject<T> {
    pub persist_id: u32,
    /// Offset of the record in the document stream.
    pub offset: usize,
    pub record: T,
}

/// The text of one slide, taken from the slide list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutline {
    pub persist_id: u32,
    pub slide_id: u32,
    pub texts: Vec<String>,
}

/// A fully decoded presentation.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ Presentation                                             │
/// │   current_user  ← Current User stream                    │
/// │   edits         ← user edit chain, merged directory      │
/// │   document      ← persist id docPersistIdRef             │
/// │   masters       ← master list, main or title             │
/// │   slides        ← slide list                             │
/// │   notes_master  ← DocumentAtom.notesMasterPersistIdRef   │
/// │   notes         ← notes list                             │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    pub current_user: CurrentUserAtom,
    pub edits: EditChain,
    pub document: DocumentContainer,
    pub masters: Vec<PersistObject<Master>>,
    pub slides: Vec<PersistObject<SlideContainer>>,
    pub notes_master: Option<PersistObject<NotesContainer>>,
    pub notes: Vec<PersistObject<NotesContainer>>,
}

impl Presentation {
    /// Slide text in slide list order.
    #[must_use]
    pub fn outline(&self) -> Vec<SlideOutline> {
        let Some(list) = self.document.slide_list(SlideListKind::Slides) else {
            return Vec::new();
        };
        list.entries
            .iter()
            .map(|entry| SlideOutline {
                persist_id: entry.persist.persist_id,
                slide_id: entry.persist.slide_id,
                texts: entry.texts.iter().map(|t| t.text().to_owned()).collect(),
            })
            .collect()
    }
}

/// Decoder for a whole presentation.
///
/// Decoding proceeds in five steps:
///
///   1. **Current user**: decode the `CurrentUserAtom` at the start of
///      the `Current User` stream. An encrypted header token stops here.
///   2. **Edit chain**: follow the user edits from the current edit back
///      to the oldest and merge their persist directories.
///   3. **Document**: decode the `DocumentContainer` at the newest
///      edit's `docPersistIdRef`.
///   4. **Masters and slides**: decode each persist id listed by the
///      master and slide lists.
///   5. **Notes**: decode the notes master and the notes list, unless
///      [`DecoderConfig::decode_notes`] is off.
///
/// Every step is fail-fast: the first [`Corrupted`] is returned as is
/// and nothing is decoded after it.
pub struct PresentationDecoder;

impl PresentationDecoder {
    /// Decode with the default configuration.
    ///
    /// # Errors
    ///
    /// As [`decode_with_config`](Self::decode_with_config).
    pub fn decode(source: &dyn StreamSource) -> Result<Presentation, Corrupted> {
        Self::decode_with_config(source, &DecoderConfig::default())
    }

    /// Decode the presentation held by `source`.
    ///
    /// # Errors
    ///
    /// - [`Cause::MissingStream`] if either stream is absent.
    /// - [`Cause::Encrypted`] for an encrypted document.
    /// - Anything the edit chain, persist resolution, or a record raises.
    pub fn decode_with_config(
        source: &dyn StreamSource,
        config: &DecoderConfig,
    ) -> Result<Presentation, Corrupted> {
        let limits = config.limits;

        let current_user_stream = stream::require(source, CURRENT_USER_STREAM)?;
        let current_user: CurrentUserAtom = decode_at(current_user_stream, 0, limits)?;
        debug!(
            user = current_user.user_name(),
            current_edit = current_user.offset_to_current_edit,
            "current user"
        );
        if current_user.is_encrypted() {
            return Err(Corrupted::new(0, Cause::Encrypted));
        }

        let document_stream = stream::require(source, DOCUMENT_STREAM)?;
        let edits = EditChain::load(
            document_stream,
            current_user.offset_to_current_edit,
            config,
        )?;
        let current = edits.current();
        if current.atom.encrypt_session_persist_id.is_some() {
            return Err(Corrupted::new(current.offset as usize, Cause::Encrypted));
        }

        let document: DocumentContainer =
            edits.decode_object(document_stream, current.atom.doc_persist_id, limits)?;

        let masters = decode_list(&edits, Some(&document.master_list), |offset| {
            decode_variant_at::<Master>(document_stream, offset, limits)
        })?;
        let slides = decode_list(&edits, document.slide_list.as_ref(), |offset| {
            decode_at::<SlideContainer>(document_stream, offset, limits)
        })?;

        let (notes_master, notes) = if config.decode_notes {
            let notes_master = match document.document_atom.notes_master_persist_id {
                0 => None,
                persist_id => {
                    let offset = edits.resolve(persist_id)?;
                    debug!(persist_id, offset, "decoding notes master");
                    Some(PersistObject {
                        persist_id,
                        offset,
                        record: decode_at(document_stream, offset, limits)?,
                    })
                }
            };
            let notes = decode_list(&edits, document.notes_list.as_ref(), |offset| {
                decode_at::<NotesContainer>(document_stream, offset, limits)
            })?;
            (notes_master, notes)
        } else {
            (None, Vec::new())
        };

        debug!(
            masters = masters.len(),
            slides = slides.len(),
            notes = notes.len(),
            "presentation decoded"
        );
        Ok(Presentation {
            current_user,
            edits,
            document,
            masters,
            slides,
            notes_master,
            notes,
        })
    }
}

/// Decode the persist object of every entry in `list`, in list order.
fn decode_list<T>(
    edits: &EditChain,
    list: Option<&SlideListWithText>,
    decode: impl Fn(usize) -> Result<T, Corrupted>,
) -> Result<Vec<PersistObject<T>>, Corrupted> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.persist_ids()
        .map(|persist_id| {
            let offset = edits.resolve(persist_id)?;
            debug!(persist_id, offset, list = ?list.kind, "decoding persist object");
            Ok(PersistObject {
                persist_id,
                offset,
                record: decode(offset)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStreams;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::Limits;

    fn current_user(token: u32) -> Vec<u8> {
        let body = Body::new()
            .u32(0x14)
            .u32(token)
            .u32(0)
            .u16(1)
            .u16(0x03F4)
            .u8(3)
            .u8(0)
            .u16(0)
            .bytes(b"a")
            .u32(8)
            .build();
        atom(0, 0, code::CURRENT_USER_ATOM, &body)
    }

    #[test]
    fn missing_current_user_stream() {
        let streams = MemoryStreams::new().with_stream(DOCUMENT_STREAM, vec![]);
        let err = PresentationDecoder::decode(&streams).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MissingStream {
                name: CURRENT_USER_STREAM
            }
        );
    }

    #[test]
    fn encrypted_header_token() {
        let streams = MemoryStreams::presentation(current_user(0xF3D1_C4DF), vec![]);
        let err = PresentationDecoder::decode(&streams).unwrap_err();
        assert_eq!(err.cause, Cause::Encrypted);
    }

    #[test]
    fn missing_document_stream() {
        let streams =
            MemoryStreams::new().with_stream(CURRENT_USER_STREAM, current_user(0xE391_C05F));
        let err = PresentationDecoder::decode(&streams).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MissingStream {
                name: DOCUMENT_STREAM
            }
        );
    }

    #[test]
    fn master_dispatches_on_record_type() {
        let main = container(code::MAIN_MASTER, 0, &[atom(0, 0, 0x1234, &[1, 2])]);
        let master = decode_variant_at::<Master>(&main, 0, Limits::default()).unwrap();
        assert!(matches!(master, Master::Main(ref m) if m.body.len() == 10));

        let other = container(code::NOTES, 0, &[]);
        let err = decode_variant_at::<Master>(&other, 0, Limits::default()).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::UnexpectedRecord {
                expected: "Master",
                record_type: code::NOTES
            }
        );
    }
}
