use ppt_wire::{
    Corrupted, Cursor, DecodeFn, Depth, HeaderSpec, Instances, Length, Match, Record,
    RecordHeader, RecordReader, TextEncoding, Variant, decode_record,
};

use crate::enums::TextType;
use crate::opaque::Opaque;
use crate::record_type::code;

/// Role of the text that follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextHeaderAtom {
    pub text_type: TextType,
}

impl Record for TextHeaderAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TextHeaderAtom", code::TEXT_HEADER_ATOM, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let raw = body.read_u32()?;
        Ok(Self {
            text_type: body.check(TextType::from_wire(raw))?,
        })
    }
}

/// UTF-16LE text, the whole body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextCharsAtom(pub String);

impl Record for TextCharsAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TextCharsAtom", code::TEXT_CHARS_ATOM, Length::Even);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let len = body.remaining();
        body.read_string(len, TextEncoding::Utf16Le).map(Self)
    }
}

/// 8-bit text: the low bytes of UTF-16 code units whose high byte is 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBytesAtom(pub String);

impl Record for TextBytesAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("TextBytesAtom", code::TEXT_BYTES_ATOM, Length::Any);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let len = body.remaining();
        body.read_string(len, TextEncoding::Ansi).map(Self)
    }
}

/// A NUL-free UTF-16 string whose meaning comes from its instance.
///
/// Used for slide names, header/footer text and programmable tag names
/// and values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CString {
    pub instance: u16,
    pub text: String,
}

impl Record for CString {
    const HEADER: HeaderSpec = HeaderSpec::atom("CString", code::CSTRING, Length::Even)
        .with_instances(Instances::Any);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let len = body.remaining();
        Ok(Self {
            instance: body.header().instance,
            text: body.read_string(len, TextEncoding::Utf16Le)?,
        })
    }
}

/// Text of a text group, stored either as UTF-16 or as 8-bit bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Text {
    Chars(String),
    Bytes(String),
}

impl Text {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chars(text) | Self::Bytes(text) => text,
        }
    }
}

// ── Meta characters ───────────────────────────────────────────────────

/// A field placeholder at a character position: `position` is the index
/// of the placeholder character in the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetaCharAtom<const TYPE: u16> {
    pub position: u32,
}

impl<const TYPE: u16> Record for MetaCharAtom<TYPE> {
    const HEADER: HeaderSpec =
        HeaderSpec::atom(crate::record_type::name_of(TYPE), TYPE, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            position: body.read_u32()?,
        })
    }
}

/// Date/time field with one of the built-in formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTimeMetaCharAtom {
    pub position: u32,
    /// Built-in format, 0..=12.
    pub format_index: u8,
}

impl Record for DateTimeMetaCharAtom {
    const HEADER: HeaderSpec = HeaderSpec::atom(
        "DateTimeMetaCharAtom",
        code::DATE_TIME_META_CHAR_ATOM,
        Length::Exact(8),
    );

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let position = body.read_u32()?;
        let format_index = body.read_u8()?;
        let format_index =
            body.check(ppt_wire::validate::in_range("index", format_index, 0..=12))?;
        body.skip(3)?;
        Ok(Self {
            position,
            format_index,
        })
    }
}

/// Bytes of the NUL-padded UTF-16 format string, after the position.
const RTF_FORMAT_SIZE: usize = 128;

/// Date/time field with a custom format string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtfDateTimeMetaCharAtom {
    pub position: u32,
    pub format: String,
}

impl Record for RtfDateTimeMetaCharAtom {
    const HEADER: HeaderSpec = HeaderSpec::atom(
        "RtfDateTimeMetaCharAtom",
        code::RTF_DATE_TIME_META_CHAR_ATOM,
        Length::Exact(0x84),
    );

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let position = body.read_u32()?;
        let raw = body.read_string(RTF_FORMAT_SIZE, TextEncoding::Utf16Le)?;
        let format = raw.split('\0').next().unwrap_or_default().to_owned();
        Ok(Self { position, format })
    }
}

/// One of the meta-character atoms that may follow a text body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaCharacter {
    SlideNumber(MetaCharAtom<{ code::SLIDE_NUMBER_META_CHAR_ATOM }>),
    DateTime(DateTimeMetaCharAtom),
    GenericDate(MetaCharAtom<{ code::GENERIC_DATE_META_CHAR_ATOM }>),
    Header(MetaCharAtom<{ code::HEADER_META_CHAR_ATOM }>),
    Footer(MetaCharAtom<{ code::FOOTER_META_CHAR_ATOM }>),
    RtfDateTime(RtfDateTimeMetaCharAtom),
}

impl MetaCharacter {
    #[must_use]
    pub fn position(&self) -> u32 {
        match self {
            Self::SlideNumber(m) => m.position,
            Self::DateTime(m) => m.position,
            Self::GenericDate(m) => m.position,
            Self::Header(m) => m.position,
            Self::Footer(m) => m.position,
            Self::RtfDateTime(m) => m.position,
        }
    }
}

fn decode_slide_number(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::SlideNumber)
}

fn decode_date_time(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::DateTime)
}

fn decode_generic_date(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::GenericDate)
}

fn decode_header(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::Header)
}

fn decode_footer(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::Footer)
}

fn decode_rtf_date_time(cursor: &mut Cursor<'_>, depth: Depth) -> Result<MetaCharacter, Corrupted> {
    decode_record(cursor, depth).map(MetaCharacter::RtfDateTime)
}

impl Variant for MetaCharacter {
    const NAME: &'static str = "MetaCharacter";

    fn decoder_for(header: &RecordHeader) -> Option<DecodeFn<Self>> {
        let decode: DecodeFn<Self> = match header.record_type {
            code::SLIDE_NUMBER_META_CHAR_ATOM => decode_slide_number,
            code::DATE_TIME_META_CHAR_ATOM => decode_date_time,
            code::GENERIC_DATE_META_CHAR_ATOM => decode_generic_date,
            code::HEADER_META_CHAR_ATOM => decode_header,
            code::FOOTER_META_CHAR_ATOM => decode_footer,
            code::RTF_DATE_TIME_META_CHAR_ATOM => decode_rtf_date_time,
            _ => return None,
        };
        Some(decode)
    }
}

// ── Text groups ───────────────────────────────────────────────────────

pub type StyleTextPropAtom = Opaque<{ code::STYLE_TEXT_PROP_ATOM }>;
pub type MasterTextPropAtom = Opaque<{ code::MASTER_TEXT_PROP_ATOM }>;
pub type TextRulerAtom = Opaque<{ code::TEXT_RULER_ATOM }>;
pub type TextBookmarkAtom = Opaque<{ code::TEXT_BOOKMARK_ATOM }>;
pub type TextSpecialInfoAtom = Opaque<{ code::TEXT_SPECIAL_INFO_ATOM }>;
pub type InteractiveInfo = Opaque<{ code::INTERACTIVE_INFO }>;

/// The character range an interactive action covers.
///
/// Instance 0 pairs with a mouse-click action, instance 1 with a
/// mouse-over action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextInteractiveInfoAtom {
    pub instance: u16,
    pub begin: i32,
    pub end: i32,
}

impl Record for TextInteractiveInfoAtom {
    const HEADER: HeaderSpec = HeaderSpec::atom(
        "TextInteractiveInfoAtom",
        code::TEXT_INTERACTIVE_INFO_ATOM,
        Length::Exact(8),
    )
    .with_instances(Instances::OneOf(&[0, 1]));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            instance: body.header().instance,
            begin: body.read_i32()?,
            end: body.read_i32()?,
        })
    }
}

/// An action (usually a hyperlink) bound to a range of a group's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInteractive {
    pub info: InteractiveInfo,
    pub range: TextInteractiveInfoAtom,
}

impl TextInteractive {
    /// Read `InteractiveInfo` / `TextInteractiveInfoAtom` pairs. Each
    /// range must carry the instance of the action before it.
    fn decode_run(body: &mut RecordReader<'_, '_>) -> Result<Vec<Self>, Corrupted> {
        let mut items = Vec::new();
        while let Some(info) = body.optional::<InteractiveInfo>()? {
            let slot = Match::of::<TextInteractiveInfoAtom>().instance(info.header.instance);
            let range = body.mandatory_matching(slot)?;
            items.push(Self { info, range });
        }
        Ok(items)
    }
}

/// One body of text in a slide list: a `TextHeaderAtom` and the records
/// that follow it up to the next header or slide.
///
/// Not a record of its own. The group is a run of siblings inside a
/// `SlideListWithTextContainer`.
///
/// ```text
///   TextHeaderAtom
///   TextCharsAtom | TextBytesAtom   (at most one)
///   StyleTextPropAtom?
///   MetaCharacter*
///   MasterTextPropAtom?
///   TextRulerAtom?
///   TextBookmarkAtom*
///   TextSpecialInfoAtom?
///   (InteractiveInfo TextInteractiveInfoAtom)*
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextGroup {
    pub header: TextHeaderAtom,
    pub text: Option<Text>,
    pub style: Option<StyleTextPropAtom>,
    pub meta_characters: Vec<MetaCharacter>,
    pub master_props: Option<MasterTextPropAtom>,
    pub ruler: Option<TextRulerAtom>,
    pub bookmarks: Vec<TextBookmarkAtom>,
    pub special_info: Option<TextSpecialInfoAtom>,
    pub interactive: Vec<TextInteractive>,
}

impl TextGroup {
    /// Decode the rest of a group whose header was already read.
    ///
    /// # Errors
    ///
    /// [`Cause::MutuallyExclusive`](ppt_wire::Cause::MutuallyExclusive)
    /// if both a chars and a bytes atom are present, plus anything a
    /// member record raises.
    pub fn decode_after(
        header: TextHeaderAtom,
        body: &mut RecordReader<'_, '_>,
    ) -> Result<Self, Corrupted> {
        let chars = body.optional::<TextCharsAtom>()?;
        let bytes = body.optional::<TextBytesAtom>()?;
        body.exclusive(&[
            ("TextCharsAtom", chars.is_some()),
            ("TextBytesAtom", bytes.is_some()),
        ])?;
        let text = chars
            .map(|TextCharsAtom(text)| Text::Chars(text))
            .or_else(|| bytes.map(|TextBytesAtom(text)| Text::Bytes(text)));

        Ok(Self {
            header,
            text,
            style: body.optional()?,
            meta_characters: body.run_variant()?,
            master_props: body.optional()?,
            ruler: body.optional()?,
            bookmarks: body.run()?,
            special_info: body.optional()?,
            interactive: TextInteractive::decode_run(body)?,
        })
    }

    /// Decode every group at the reader's position.
    ///
    /// # Errors
    ///
    /// As [`decode_after`](Self::decode_after).
    pub fn decode_run(body: &mut RecordReader<'_, '_>) -> Result<Vec<Self>, Corrupted> {
        let mut groups = Vec::new();
        while let Some(header) = body.optional::<TextHeaderAtom>()? {
            groups.push(Self::decode_after(header, body)?);
        }
        Ok(groups)
    }

    /// The group's text, `""` when it has none.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_ref().map_or("", Text::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::{Cause, Limits, decode_at};

    /// Test wrapper: a container holding nothing but text groups.
    #[derive(Debug)]
    struct Groups(Vec<TextGroup>);

    impl Record for Groups {
        const HEADER: HeaderSpec = HeaderSpec::container("Groups", 0x7000);

        fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
            TextGroup::decode_run(body).map(Self)
        }
    }

    fn text_header(text_type: u32) -> Vec<u8> {
        atom(0, 0, code::TEXT_HEADER_ATOM, &Body::new().u32(text_type).build())
    }

    fn chars(text: &str) -> Vec<u8> {
        atom(0, 0, code::TEXT_CHARS_ATOM, &Body::new().utf16(text).build())
    }

    fn bytes(text: &str) -> Vec<u8> {
        atom(0, 0, code::TEXT_BYTES_ATOM, text.as_bytes())
    }

    fn decode(children: &[Vec<u8>]) -> Result<Vec<TextGroup>, Corrupted> {
        let buf = container(0x7000, 0, children);
        decode_at::<Groups>(&buf, 0, Limits::default()).map(|g| g.0)
    }

    #[test]
    fn groups_split_at_each_header() {
        let slide_number = atom(
            0,
            0,
            code::SLIDE_NUMBER_META_CHAR_ATOM,
            &Body::new().u32(7).build(),
        );
        let groups = decode(&[
            text_header(0),
            chars("Title"),
            text_header(1),
            bytes("Body text"),
            slide_number,
        ])
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].header.text_type, TextType::Title);
        assert_eq!(groups[0].text(), "Title");
        assert_eq!(groups[1].text, Some(Text::Bytes("Body text".into())));
        assert_eq!(groups[1].meta_characters.len(), 1);
        assert_eq!(groups[1].meta_characters[0].position(), 7);
    }

    #[test]
    fn chars_and_bytes_together_are_corrupted() {
        let err = decode(&[text_header(1), chars("a"), bytes("b")]).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MutuallyExclusive {
                first: "TextCharsAtom",
                second: "TextBytesAtom"
            }
        );
    }

    #[test]
    fn group_without_text() {
        let groups = decode(&[text_header(4)]).unwrap();
        assert_eq!(groups[0].text, None);
        assert_eq!(groups[0].text(), "");
    }

    #[test]
    fn odd_length_chars_atom_is_rejected() {
        let odd = atom(0, 0, code::TEXT_CHARS_ATOM, &[0x41, 0x00, 0x42]);
        let err = decode(&[text_header(0), odd]).unwrap_err();
        assert!(matches!(err.cause, Cause::HeaderMismatch { field: "recLen", .. }));
    }

    #[test]
    fn unknown_text_type() {
        let err = decode(&[text_header(3)]).unwrap_err();
        assert!(matches!(
            err.cause,
            Cause::InvalidEnumValue {
                enum_name: "TextType",
                value: 3
            }
        ));
    }

    fn hyperlink(instance: u16, begin: i32, end: i32) -> Vec<Vec<u8>> {
        let action = atom(0, 0, code::INTERACTIVE_INFO_ATOM, &[0; 16]);
        vec![
            container(code::INTERACTIVE_INFO, instance, &[action]),
            atom(
                0,
                instance,
                code::TEXT_INTERACTIVE_INFO_ATOM,
                &Body::new().i32(begin).i32(end).build(),
            ),
        ]
    }

    #[test]
    fn hyperlinks_follow_special_info() {
        let special = atom(0, 0, code::TEXT_SPECIAL_INFO_ATOM, &[0; 6]);
        let mut children = vec![text_header(1), chars("see link"), special];
        children.extend(hyperlink(0, 4, 8));
        children.extend(hyperlink(1, 0, 3));
        children.push(text_header(4));
        let groups = decode(&children).unwrap();

        assert_eq!(groups.len(), 2);
        assert!(groups[0].special_info.is_some());
        let ranges: Vec<_> = groups[0].interactive.iter().map(|i| i.range).collect();
        assert_eq!(
            ranges,
            vec![
                TextInteractiveInfoAtom { instance: 0, begin: 4, end: 8 },
                TextInteractiveInfoAtom { instance: 1, begin: 0, end: 3 },
            ]
        );
        assert_eq!(
            groups[0].interactive[0].info.header.record_type,
            code::INTERACTIVE_INFO
        );
        assert!(groups[1].interactive.is_empty());
    }

    #[test]
    fn hyperlink_without_range_is_corrupted() {
        let info = container(code::INTERACTIVE_INFO, 0, &[]);
        let err = decode(&[text_header(1), chars("x"), info]).unwrap_err();
        assert!(matches!(err.cause, Cause::MissingRecord { .. }));
    }

    #[test]
    fn hyperlink_range_must_match_action_instance() {
        let mut children = vec![text_header(1), chars("x")];
        let mut pair = hyperlink(0, 0, 1);
        pair[1] = atom(
            0,
            1,
            code::TEXT_INTERACTIVE_INFO_ATOM,
            &Body::new().i32(0).i32(1).build(),
        );
        children.extend(pair);
        let err = decode(&children).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::UnexpectedRecord {
                expected: "TextInteractiveInfoAtom",
                record_type: code::TEXT_INTERACTIVE_INFO_ATOM,
            }
        );
    }

    #[test]
    fn cstring_keeps_its_instance() {
        let buf = atom(0, 3, code::CSTRING, &Body::new().utf16("Intro").build());
        let s: CString = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(s.instance, 3);
        assert_eq!(s.text, "Intro");
    }

    #[test]
    fn rtf_date_format_is_trimmed() {
        let body = Body::new().u32(2).utf16("dd/MM/yyyy");
        let padding = 4 + RTF_FORMAT_SIZE - body.len();
        let buf = atom(
            0,
            0,
            code::RTF_DATE_TIME_META_CHAR_ATOM,
            &body.zeros(padding).build(),
        );
        let meta: RtfDateTimeMetaCharAtom = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(meta.format, "dd/MM/yyyy");
    }
}
