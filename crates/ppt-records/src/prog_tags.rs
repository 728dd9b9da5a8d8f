use ppt_wire::{
    Corrupted, Cursor, DecodeFn, Depth, HeaderSpec, Length, Match, Record, RecordHeader,
    RecordReader, Variant, decode_record,
};

use crate::opaque::Opaque;
use crate::record_type::code;
use crate::text::CString;
use crate::timing::ExtTimeNode;

/// Tag name that marks a PowerPoint 10 slide extension.
pub const PPT10_TAG: &str = "___PPT10";

fn tag_string(body: &mut RecordReader<'_, '_>, instance: u16) -> Result<Option<String>, Corrupted> {
    let slot = Match::of::<CString>().instance(instance);
    Ok(body.optional_matching::<CString>(slot)?.map(|s| s.text))
}

/// A named string value attached to a slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgStringTag {
    pub name: String,
    pub value: Option<String>,
}

impl Record for ProgStringTag {
    const HEADER: HeaderSpec = HeaderSpec::container("ProgStringTagContainer", code::PROG_STRING_TAG);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let name = body
            .mandatory_matching::<CString>(Match::of::<CString>().instance(0))?
            .text;
        Ok(Self {
            name,
            value: tag_string(body, 1)?,
        })
    }
}

/// Payload of a binary tag, selected by the tag's name.
#[derive(Clone, Debug, PartialEq)]
pub enum BinaryTagData {
    /// The `___PPT10` extension: comments, links, timing, builds.
    Ppt10(Box<Ppt10SlideExtension>),
    Other(Opaque<{ code::BINARY_TAG_DATA_BLOB }>),
}

/// A named binary value attached to a slide.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgBinaryTag {
    pub name: String,
    pub data: BinaryTagData,
}

impl Record for ProgBinaryTag {
    const HEADER: HeaderSpec = HeaderSpec::container("ProgBinaryTagContainer", code::PROG_BINARY_TAG);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let name = body
            .mandatory_matching::<CString>(Match::of::<CString>().instance(0))?
            .text;
        let data = if name == PPT10_TAG {
            BinaryTagData::Ppt10(Box::new(body.mandatory()?))
        } else {
            BinaryTagData::Other(body.mandatory()?)
        };
        Ok(Self { name, data })
    }
}

/// Whether the slide keeps its master when the master is unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideFlags10Atom {
    pub preserve_master: bool,
}

impl Record for SlideFlags10Atom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("SlideFlags10Atom", code::SLIDE_FLAGS_10_ATOM, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let mut bits = body.read_bits_u32()?;
        let preserve_master = bits.read_bit();
        let _reserved = bits.read_remaining_bits();
        Ok(Self { preserve_master })
    }
}

/// Last modification time of the slide, as a Windows `FILETIME`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideTime10Atom {
    pub file_time: u64,
}

impl Record for SlideTime10Atom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("SlideTime10Atom", code::SLIDE_TIME_10_ATOM, Length::Exact(8));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            file_time: body.read_u64()?,
        })
    }
}

/// Hash of the slide's animation data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashCodeAtom {
    pub hash: u32,
}

impl Record for HashCodeAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("HashCodeAtom", code::HASH_CODE_ATOM, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            hash: body.read_u32()?,
        })
    }
}

pub type Comment10 = Opaque<{ code::COMMENT_10 }>;
pub type LinkedSlide10Atom = Opaque<{ code::LINKED_SLIDE_10_ATOM }>;
pub type LinkedShape10Atom = Opaque<{ code::LINKED_SHAPE_10_ATOM }>;
pub type BuildList = Opaque<{ code::BUILD_LIST }>;

/// Slide data added by the 2002 format revision, stored in a binary tag
/// named `___PPT10`.
///
/// ```text
///   BinaryTagDataBlob (0x138B)
///   ├── Comment10Container*
///   ├── LinkedSlide10Atom?
///   ├── LinkedShape10Atom*
///   ├── SlideFlags10Atom?
///   ├── SlideTime10Atom?
///   ├── HashCodeAtom?
///   ├── ExtTimeNodeContainer?     (animation timing root)
///   └── BuildListContainer?
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Ppt10SlideExtension {
    pub comments: Vec<Comment10>,
    pub linked_slide: Option<LinkedSlide10Atom>,
    pub linked_shapes: Vec<LinkedShape10Atom>,
    pub slide_flags: Option<SlideFlags10Atom>,
    pub slide_time: Option<SlideTime10Atom>,
    pub hash_code: Option<HashCodeAtom>,
    pub time_node: Option<ExtTimeNode>,
    pub build_list: Option<BuildList>,
}

impl Record for Ppt10SlideExtension {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("PP10SlideBinaryTagExtension", code::BINARY_TAG_DATA_BLOB, Length::Any);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            comments: body.run()?,
            linked_slide: body.optional()?,
            linked_shapes: body.run()?,
            slide_flags: body.optional()?,
            slide_time: body.optional()?,
            hash_code: body.optional()?,
            time_node: body.optional()?,
            build_list: body.optional()?,
        })
    }
}

/// One entry of a programmable tags list.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgTag {
    String(ProgStringTag),
    Binary(ProgBinaryTag),
}

impl ProgTag {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String(tag) => &tag.name,
            Self::Binary(tag) => &tag.name,
        }
    }
}

fn decode_string_tag(cursor: &mut Cursor<'_>, depth: Depth) -> Result<ProgTag, Corrupted> {
    decode_record(cursor, depth).map(ProgTag::String)
}

fn decode_binary_tag(cursor: &mut Cursor<'_>, depth: Depth) -> Result<ProgTag, Corrupted> {
    decode_record(cursor, depth).map(ProgTag::Binary)
}

impl Variant for ProgTag {
    const NAME: &'static str = "ProgTag";

    fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>> {
        let decode: DecodeFn<Self> = match header.record_type {
            code::PROG_STRING_TAG => decode_string_tag,
            code::PROG_BINARY_TAG => decode_binary_tag,
            _ => return None,
        };
        Some(decode)
    }
}

/// Programmable tags of a slide or notes page.
///
/// Records between tags that are neither string nor binary tags are
/// skipped and counted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideProgTags {
    pub tags: Vec<ProgTag>,
    pub skipped_records: usize,
}

impl SlideProgTags {
    /// The `___PPT10` extension, if the slide has one.
    #[must_use]
    pub fn ppt10(&self) -> Option<&Ppt10SlideExtension> {
        self.tags.iter().find_map(|tag| match tag {
            ProgTag::Binary(ProgBinaryTag {
                data: BinaryTagData::Ppt10(ext),
                ..
            }) => Some(ext.as_ref()),
            _ => None,
        })
    }
}

impl Record for SlideProgTags {
    const HEADER: HeaderSpec = HeaderSpec::container("SlideProgTagsContainer", code::PROG_TAGS);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let mut tags = Vec::new();
        let mut skipped_records = 0;
        loop {
            skipped_records += body.skip_unknown(|h| ProgTag::decoder_for(h).is_some())?;
            match body.optional_variant::<ProgTag>()? {
                Some(tag) => tags.push(tag),
                None => break,
            }
        }
        Ok(Self {
            tags,
            skipped_records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::{Cause, Limits, decode_at};

    fn cstring(instance: u16, text: &str) -> Vec<u8> {
        atom(0, instance, code::CSTRING, &Body::new().utf16(text).build())
    }

    fn decode(buf: &[u8]) -> Result<SlideProgTags, Corrupted> {
        decode_at(buf, 0, Limits::default())
    }

    #[test]
    fn string_binary_and_unknown_tags() {
        let string_tag = container(
            code::PROG_STRING_TAG,
            0,
            &[cstring(0, "author"), cstring(1, "me")],
        );
        let blob = atom(0, 0, code::BINARY_TAG_DATA_BLOB, &[1, 2, 3]);
        let binary_tag = container(code::PROG_BINARY_TAG, 0, &[cstring(0, "custom"), blob]);
        let unknown = atom(0, 0, 0x5555, &[0; 4]);
        let buf = container(code::PROG_TAGS, 0, &[string_tag, unknown, binary_tag]);

        let tags = decode(&buf).unwrap();
        assert_eq!(tags.skipped_records, 1);
        assert_eq!(
            tags.tags.iter().map(ProgTag::name).collect::<Vec<_>>(),
            vec!["author", "custom"]
        );
        match &tags.tags[1] {
            ProgTag::Binary(ProgBinaryTag {
                data: BinaryTagData::Other(blob),
                ..
            }) => assert_eq!(blob.body, vec![1, 2, 3]),
            other => panic!("expected an opaque binary tag, got {other:?}"),
        }
        assert!(tags.ppt10().is_none());
    }

    #[test]
    fn ppt10_tag_selects_the_extension_layout() {
        let flags = atom(0, 0, code::SLIDE_FLAGS_10_ATOM, &Body::new().u32(1).build());
        let time = atom(0, 0, code::SLIDE_TIME_10_ATOM, &Body::new().u64(42).build());
        // The extension blob is a version 0 record that holds records.
        let ext = atom(0, 0, code::BINARY_TAG_DATA_BLOB, &[flags, time].concat());
        let binary_tag = container(code::PROG_BINARY_TAG, 0, &[cstring(0, PPT10_TAG), ext]);
        let buf = container(code::PROG_TAGS, 0, &[binary_tag]);

        let tags = decode(&buf).unwrap();
        let ext = tags.ppt10().unwrap();
        assert_eq!(ext.slide_flags, Some(SlideFlags10Atom { preserve_master: true }));
        assert_eq!(ext.slide_time, Some(SlideTime10Atom { file_time: 42 }));
        assert!(ext.time_node.is_none());
    }

    #[test]
    fn tag_without_name() {
        let tag = container(code::PROG_STRING_TAG, 0, &[]);
        let buf = container(code::PROG_TAGS, 0, &[tag]);
        let err = decode(&buf).unwrap_err();
        assert_eq!(err.cause, Cause::MissingRecord { record: "CString" });
    }
}
