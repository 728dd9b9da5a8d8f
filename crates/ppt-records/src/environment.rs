use ppt_wire::{
    Corrupted, HeaderSpec, Instances, Length, Record, RecordReader, TextEncoding,
};

use crate::opaque::Opaque;
use crate::record_type::code;

pub type Kinsoku = Opaque<{ code::KINSOKU }>;
pub type CharFormatDefaults = Opaque<{ code::TEXT_CHAR_FORMAT_EXCEPTION_ATOM }>;
pub type ParagraphFormatDefaults = Opaque<{ code::TEXT_PARAGRAPH_FORMAT_EXCEPTION_ATOM }>;
pub type DefaultRulerAtom = Opaque<{ code::DEFAULT_RULER_ATOM }>;
pub type SpecialInfoDefaults = Opaque<{ code::TEXT_SPECIAL_INFO_DEFAULT_ATOM }>;
pub type TextMasterStyleAtom = Opaque<{ code::TEXT_MASTER_STYLE_ATOM }>;
pub type FontEmbedData = Opaque<{ code::FONT_EMBED_DATA_BLOB }>;

/// Default text formatting and the font table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentTextInfo {
    pub kinsoku: Option<Kinsoku>,
    pub fonts: FontCollection,
    pub char_format_defaults: Option<CharFormatDefaults>,
    pub paragraph_format_defaults: Option<ParagraphFormatDefaults>,
    pub default_ruler: Option<DefaultRulerAtom>,
    pub special_info_defaults: SpecialInfoDefaults,
    pub master_style: TextMasterStyleAtom,
}

impl Record for DocumentTextInfo {
    const HEADER: HeaderSpec =
        HeaderSpec::container("DocumentTextInfoContainer", code::ENVIRONMENT);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            kinsoku: body.optional()?,
            fonts: body.mandatory()?,
            char_format_defaults: body.optional()?,
            paragraph_format_defaults: body.optional()?,
            default_ruler: body.optional()?,
            special_info_defaults: body.mandatory()?,
            master_style: body.mandatory()?,
        })
    }
}

/// One font and up to four embedded font files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontEntry {
    pub font: FontEntityAtom,
    pub embedded: Vec<FontEmbedData>,
}

/// The document's font table. A font's index is its position here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontCollection {
    pub entries: Vec<FontEntry>,
}

impl FontCollection {
    /// Face name of font `index`.
    #[must_use]
    pub fn face_name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.font.face_name.as_str())
    }
}

impl Record for FontCollection {
    const HEADER: HeaderSpec =
        HeaderSpec::container("FontCollectionContainer", code::FONT_COLLECTION);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let mut entries = Vec::new();
        while let Some(font) = body.optional::<FontEntityAtom>()? {
            let embedded = body.run()?;
            entries.push(FontEntry { font, embedded });
        }
        Ok(Self { entries })
    }
}

/// Bytes of the NUL-padded UTF-16 face name.
const FACE_NAME_SIZE: usize = 64;

/// A font definition.
///
/// ```text
/// ┌────────┬──────┬───────────────────────────────────────────┐
/// │ Offset │ Size │ Field                                     │
/// ├────────┼──────┼───────────────────────────────────────────┤
/// │ 0x00   │ 64   │ lfFaceName, UTF-16LE, NUL padded          │
/// │ 0x40   │ 1    │ lfCharSet                                 │
/// │ 0x41   │ 1    │ bit 0 fEmbedSubsetted, bits 1..8 reserved │
/// │ 0x42   │ 1    │ bits 0..4 font type flags, 4..8 reserved  │
/// │ 0x43   │ 1    │ lfPitchAndFamily                          │
/// └────────┴──────┴───────────────────────────────────────────┘
/// ```
///
/// The instance holds the font index and is not constrained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontEntityAtom {
    pub face_name: String,
    pub char_set: u8,
    pub embed_subsetted: bool,
    pub raster_font: bool,
    pub device_font: bool,
    pub truetype_font: bool,
    pub no_font_substitution: bool,
    pub pitch_and_family: u8,
}

impl Record for FontEntityAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("FontEntityAtom", code::FONT_ENTITY_ATOM, Length::Exact(0x44))
            .with_instances(Instances::Any);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let raw_name = body.read_string(FACE_NAME_SIZE, TextEncoding::Utf16Le)?;
        let face_name = match raw_name.find('\0') {
            Some(end) => raw_name[..end].to_owned(),
            None => raw_name,
        };
        let char_set = body.read_u8()?;

        let mut embed = body.read_bits_u8()?;
        let embed_subsetted = embed.read_bit();
        let _reserved = embed.read_remaining_bits();

        let mut kind = body.read_bits_u8()?;
        let raster_font = kind.read_bit();
        let device_font = kind.read_bit();
        let truetype_font = kind.read_bit();
        let no_font_substitution = kind.read_bit();
        let _reserved = kind.read_remaining_bits();

        Ok(Self {
            face_name,
            char_set,
            embed_subsetted,
            raster_font,
            device_font,
            truetype_font,
            no_font_substitution,
            pitch_and_family: body.read_u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::{Limits, decode_at};

    fn font(index: u16, name: &str) -> Vec<u8> {
        let name = Body::new().utf16(name);
        let padding = FACE_NAME_SIZE - name.len();
        let body = name
            .zeros(padding)
            .u8(0)
            .u8(0b0000_0001)
            .u8(0b0000_0100)
            .u8(0x22)
            .build();
        atom(0, index, code::FONT_ENTITY_ATOM, &body)
    }

    #[test]
    fn face_name_stops_at_the_first_nul() {
        let buf = font(0, "Arial");
        let atom: FontEntityAtom = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(atom.face_name, "Arial");
        assert!(atom.embed_subsetted);
        assert!(atom.truetype_font);
        assert!(!atom.raster_font);
        assert_eq!(atom.pitch_and_family, 0x22);
    }

    #[test]
    fn collection_groups_embedded_data_with_its_font() {
        let embed = atom(0, 0, code::FONT_EMBED_DATA_BLOB, &[0xAA; 6]);
        let buf = container(
            code::FONT_COLLECTION,
            0,
            &[font(0, "Arial"), embed, font(1, "Courier New")],
        );
        let fonts: FontCollection = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(fonts.entries.len(), 2);
        assert_eq!(fonts.entries[0].embedded.len(), 1);
        assert!(fonts.entries[1].embedded.is_empty());
        assert_eq!(fonts.face_name(1), Some("Courier New"));
        assert_eq!(fonts.face_name(2), None);
    }
}
