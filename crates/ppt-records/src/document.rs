use ppt_wire::{Corrupted, HeaderSpec, Length, Match, Record, RecordReader, validate};

use crate::enums::{SlideListKind, SlideSize};
use crate::environment::DocumentTextInfo;
use crate::geometry::{Point, Ratio};
use crate::headers_footers::HeadersFooters;
use crate::opaque::Opaque;
use crate::record_type::code;
use crate::slide_list::SlideListWithText;

/// Largest legal `firstSlideNumber`.
pub const MAX_FIRST_SLIDE_NUMBER: u16 = 9999;

/// Document-wide settings.
///
/// ```text
/// ┌────────┬──────┬─────────────────────────────────┐
/// │ Offset │ Size │ Field                           │
/// ├────────┼──────┼─────────────────────────────────┤
/// │ 0x00   │ 8    │ slideSize (PointStruct)         │
/// │ 0x08   │ 8    │ notesSize (PointStruct)         │
/// │ 0x10   │ 8    │ serverZoom (RatioStruct)        │
/// │ 0x18   │ 4    │ notesMasterPersistIdRef         │
/// │ 0x1C   │ 4    │ handoutMasterPersistIdRef       │
/// │ 0x20   │ 2    │ firstSlideNumber (0..=9999)     │
/// │ 0x22   │ 2    │ slideSizeType                   │
/// │ 0x24   │ 4    │ four one-byte booleans          │
/// └────────┴──────┴─────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentAtom {
    pub slide_size: Point,
    pub notes_size: Point,
    pub server_zoom: Ratio,
    /// 0 when the document has no notes master.
    pub notes_master_persist_id: u32,
    /// 0 when the document has no handout master.
    pub handout_master_persist_id: u32,
    pub first_slide_number: u16,
    pub slide_size_type: SlideSize,
    pub save_with_fonts: bool,
    pub omit_title_place: bool,
    pub right_to_left: bool,
    pub show_comments: bool,
}

impl Record for DocumentAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("DocumentAtom", code::DOCUMENT_ATOM, Length::Exact(0x28)).with_version(1);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let slide_size = Point::read(body)?;
        let notes_size = Point::read(body)?;
        let server_zoom = Ratio::read(body)?;
        let notes_master_persist_id = body.read_u32()?;
        let handout_master_persist_id = body.read_u32()?;
        let first_slide_number = body.read_u16()?;
        let first_slide_number = body.check(validate::in_range(
            "firstSlideNumber",
            first_slide_number,
            0..=MAX_FIRST_SLIDE_NUMBER,
        ))?;
        let slide_size_type = body.read_u16()?;
        let slide_size_type = body.check(SlideSize::from_wire(slide_size_type))?;
        Ok(Self {
            slide_size,
            notes_size,
            server_zoom,
            notes_master_persist_id,
            handout_master_persist_id,
            first_slide_number,
            slide_size_type,
            save_with_fonts: body.read_bool8("fSaveWithFonts")?,
            omit_title_place: body.read_bool8("fOmitTitlePlace")?,
            right_to_left: body.read_bool8("fRightToLeft")?,
            show_comments: body.read_bool8("fShowComments")?,
        })
    }
}

/// Empty marker that closes the document container's main slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndDocumentAtom;

impl Record for EndDocumentAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("EndDocumentAtom", code::END_DOCUMENT_ATOM, Length::Exact(0));

    fn decode_body(_body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self)
    }
}

pub type ExternalObjectList = Opaque<{ code::EXTERNAL_OBJECT_LIST }>;
pub type SoundCollection = Opaque<{ code::SOUND_COLLECTION }>;
pub type DrawingGroup = Opaque<{ code::DRAWING_GROUP }>;
pub type DocInfoList = Opaque<{ code::LIST }>;
pub type SlideShowDocInfoAtom = Opaque<{ code::SLIDE_SHOW_DOC_INFO_ATOM }>;
pub type NamedShows = Opaque<{ code::NAMED_SHOWS }>;
pub type Summary = Opaque<{ code::SUMMARY }>;
pub type DocRoutingSlipAtom = Opaque<{ code::DOC_ROUTING_SLIP_ATOM }>;
pub type PrintOptionsAtom = Opaque<{ code::PRINT_OPTIONS_ATOM }>;
pub type CustomTableStyles = Opaque<{ code::ROUND_TRIP_CUSTOM_TABLE_STYLES_12_ATOM }>;

/// Top-level record of the document stream, reached through the
/// `docPersistIdRef` of the newest user edit.
///
/// Slots in format order. Mandatory: `document_atom`,
/// `document_text_info`, `drawing_group`, `master_list`,
/// `end_document_atom`. Everything else may be absent.
///
/// ```text
///   DocumentContainer (0x03E8)
///   ├── DocumentAtom
///   ├── ExObjList?
///   ├── DocumentTextInfoContainer
///   ├── SoundCollection?
///   ├── DrawingGroup
///   ├── SlideListWithText (instance 1, masters)
///   ├── DocInfoList?
///   ├── HeadersFooters? (instance 3, slides)
///   ├── HeadersFooters? (instance 4, notes)
///   ├── SlideListWithText? (instance 0, slides)
///   ├── SlideListWithText? (instance 2, notes)
///   ├── SlideShowDocInfoAtom?  NamedShows?  Summary?
///   ├── DocRoutingSlipAtom?  PrintOptionsAtom?
///   ├── RoundTripCustomTableStyles12Atom?
///   ├── EndDocumentAtom
///   └── RoundTripCustomTableStyles12Atom?
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentContainer {
    pub document_atom: DocumentAtom,
    pub external_objects: Option<ExternalObjectList>,
    pub document_text_info: DocumentTextInfo,
    pub sound_collection: Option<SoundCollection>,
    pub drawing_group: DrawingGroup,
    pub master_list: SlideListWithText,
    pub doc_info_list: Option<DocInfoList>,
    pub slide_headers_footers: Option<HeadersFooters>,
    pub notes_headers_footers: Option<HeadersFooters>,
    pub slide_list: Option<SlideListWithText>,
    pub notes_list: Option<SlideListWithText>,
    pub slide_show_doc_info: Option<SlideShowDocInfoAtom>,
    pub named_shows: Option<NamedShows>,
    pub summary: Option<Summary>,
    pub doc_routing_slip: Option<DocRoutingSlipAtom>,
    pub print_options: Option<PrintOptionsAtom>,
    pub custom_table_styles_1: Option<CustomTableStyles>,
    pub end_document_atom: EndDocumentAtom,
    pub custom_table_styles_2: Option<CustomTableStyles>,
}

impl DocumentContainer {
    /// The slide list of `kind`, if present.
    #[must_use]
    pub fn slide_list(&self, kind: SlideListKind) -> Option<&SlideListWithText> {
        match kind {
            SlideListKind::Masters => Some(&self.master_list),
            SlideListKind::Slides => self.slide_list.as_ref(),
            SlideListKind::Notes => self.notes_list.as_ref(),
        }
    }
}

fn slide_list(kind: SlideListKind) -> Match {
    Match::of::<SlideListWithText>().instance(kind.to_wire())
}

impl Record for DocumentContainer {
    const HEADER: HeaderSpec = HeaderSpec::container("DocumentContainer", code::DOCUMENT);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let headers_footers = Match::of::<HeadersFooters>();
        Ok(Self {
            document_atom: body.mandatory()?,
            external_objects: body.optional()?,
            document_text_info: body.mandatory()?,
            sound_collection: body.optional()?,
            drawing_group: body.mandatory()?,
            master_list: body.mandatory_matching(slide_list(SlideListKind::Masters))?,
            doc_info_list: body.optional()?,
            slide_headers_footers: body.optional_matching(headers_footers.instance(3))?,
            notes_headers_footers: body.optional_matching(headers_footers.instance(4))?,
            slide_list: body.optional_matching(slide_list(SlideListKind::Slides))?,
            notes_list: body.optional_matching(slide_list(SlideListKind::Notes))?,
            slide_show_doc_info: body.optional()?,
            named_shows: body.optional()?,
            summary: body.optional()?,
            doc_routing_slip: body.optional()?,
            print_options: body.optional()?,
            custom_table_styles_1: body.optional()?,
            end_document_atom: body.mandatory()?,
            custom_table_styles_2: body.optional()?,
        })
    }
}
